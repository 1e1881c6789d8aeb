use proptest::prelude::*;
use svc_fs::{rcconf, split_words};

proptest! {
    #[test]
    fn test_plan_is_idempotent(
        lines in prop::collection::vec("[a-z_]{1,8}=\"[A-Za-z0-9]{0,6}\"|# [ -~]{0,20}|", 0..8),
        key in "[a-z_]{1,8}",
        value in "[A-Za-z0-9]{1,6}",
    ) {
        let content = lines.join("\n");
        let first = rcconf::plan(&content, &key, &value);
        let second = rcconf::plan(&first.content, &key, &value);

        // Applying the same edit twice never changes anything the second time
        prop_assert!(!second.changed);
        prop_assert_eq!(&second.content, &first.content);
    }

    #[test]
    fn test_plan_touches_at_most_one_line_when_key_unique(
        others in prop::collection::vec("[a-z]{1,6}_x=\"[A-Z]{1,4}\"", 0..6),
        old in "[A-Z]{1,4}",
        value in "[A-Z]{1,4}",
    ) {
        let mut lines = others.clone();
        lines.push(format!("svc_enable=\"{}\"", old));
        let content = format!("{}\n", lines.join("\n"));

        let plan = rcconf::plan(&content, "svc_enable", &value);

        let before: Vec<&str> = content.lines().collect();
        let after: Vec<&str> = plan.content.lines().collect();
        prop_assert_eq!(before.len(), after.len());
        let differing = before.iter().zip(&after).filter(|(a, b)| a != b).count();
        prop_assert!(differing <= 1);
        prop_assert_eq!(plan.changed, old != value);
    }

    #[test]
    fn test_split_words_plain_tokens(words in prop::collection::vec("[A-Za-z0-9_=.-]{1,10}", 0..6)) {
        // Unquoted words without shell metacharacters split back unchanged
        let line = words.join(" ");
        prop_assert_eq!(split_words(&line).unwrap(), words);
    }
}
