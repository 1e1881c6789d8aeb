//! Running-state detection
//!
//! No single signal says reliably whether a service runs, so detection is a
//! cascade. A process-table scan goes first when the caller gave a pattern.
//! Then the platform's status command runs once and its output is handed to
//! an ordered list of [`Heuristic`]s. The first heuristic to return a
//! definite answer wins and later ones are never consulted.

use svc_exec::CommandResult;

use crate::command::Invocation;
use crate::config::SpecialCase;
use crate::controller::Host;
use crate::request::ServiceRequest;
use crate::state::RunningState;
use crate::{Error, Result};

/// Exit code to state mapping for a status command
pub type ExitCodeTable = &'static [(i32, RunningState)];

/// LSB init script status codes
pub const LINUX_EXIT_CODES: ExitCodeTable = &[
    (0, RunningState::Running),
    (2, RunningState::NotRunning),
    (3, RunningState::NotRunning),
];

/// `onestatus` / `check` on the BSDs
pub const BSD_EXIT_CODES: ExitCodeTable = &[(0, RunningState::Running), (1, RunningState::NotRunning)];

pub const LINUX_CASCADE: &[Heuristic] = &[
    Heuristic::InitQueryPhrases,
    Heuristic::ExitCodes(LINUX_EXIT_CODES),
    Heuristic::StatusKeywords,
    Heuristic::SpecialCases,
];

pub const BSD_CASCADE: &[Heuristic] = &[Heuristic::ExitCodes(BSD_EXIT_CODES)];

const NOT_RUNNING_PHRASES: &[&str] = &[
    "could not access pid file",
    "is dead and pid file exists",
    "dead but subsys locked",
    "dead but pid file exists",
];

/// Output gathered once and shared by every heuristic.
#[derive(Debug, Clone, Copy)]
pub struct StatusEvidence<'a> {
    pub name: &'a str,
    pub status: &'a CommandResult,
    pub init_query: Option<&'a CommandResult>,
    pub special_cases: &'a [SpecialCase],
}

/// One way of reading a running state out of [`StatusEvidence`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// `initctl status` phrases: `stop/waiting`, `start/running`
    InitQueryPhrases,
    /// Status command exit code looked up in a table
    ExitCodes(ExitCodeTable),
    /// Keywords in the status command's stdout
    StatusKeywords,
    /// Per-service rules from [`SpecialCase`]
    SpecialCases,
}

impl Heuristic {
    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::InitQueryPhrases => "init query phrases",
            Heuristic::ExitCodes(_) => "exit code",
            Heuristic::StatusKeywords => "status keywords",
            Heuristic::SpecialCases => "special cases",
        }
    }

    /// A definite state, or `None` when this heuristic cannot tell.
    pub fn evaluate(&self, evidence: &StatusEvidence<'_>) -> Option<RunningState> {
        match self {
            Heuristic::InitQueryPhrases => {
                let stdout = &evidence.init_query?.stdout;
                if stdout.contains("stop/waiting") {
                    Some(RunningState::NotRunning)
                } else if stdout.contains("start/running") {
                    Some(RunningState::Running)
                } else {
                    None
                }
            }
            Heuristic::ExitCodes(table) => table
                .iter()
                .find(|(code, _)| *code == evidence.status.code)
                .map(|(_, state)| *state),
            Heuristic::StatusKeywords => keyword_state(&evidence.status.stdout, evidence.name),
            Heuristic::SpecialCases => evidence
                .special_cases
                .iter()
                .find(|rule| {
                    rule.service == evidence.name && evidence.status.stdout.contains(&rule.contains)
                })
                .map(|rule| RunningState::from_running(rule.running)),
        }
    }
}

/// Evaluate `cascade` in order, stopping at the first definite answer.
pub fn resolve(cascade: &[Heuristic], evidence: &StatusEvidence<'_>) -> RunningState {
    for heuristic in cascade {
        if let Some(state) = heuristic.evaluate(evidence) {
            tracing::debug!(
                service = evidence.name,
                heuristic = heuristic.name(),
                state = %state,
                "Status determined"
            );
            return state;
        }
    }
    tracing::debug!(service = evidence.name, "No heuristic could determine status");
    RunningState::Unknown
}

fn keyword_state(stdout: &str, name: &str) -> Option<RunningState> {
    let clean = stdout.to_lowercase().replace(&name.to_lowercase(), "");
    let not = clean.contains("not");

    if clean.contains("stop")
        || (clean.contains("run") && not)
        || NOT_RUNNING_PHRASES.iter().any(|p| clean.contains(p))
    {
        Some(RunningState::NotRunning)
    } else if (clean.contains("run") || clean.contains("start")) && !not {
        Some(RunningState::Running)
    } else {
        None
    }
}

/// How a controller's status is queried
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionStrategy {
    /// Platform status command
    pub status: Invocation,
    /// Init daemon query, run alongside the status command when present
    pub init_query: Option<Invocation>,
    pub cascade: &'static [Heuristic],
}

/// Runs the detection cascade for one request.
pub struct StatusDetector<'a> {
    host: Host<'a>,
}

impl<'a> StatusDetector<'a> {
    pub fn new(host: Host<'a>) -> Self {
        Self { host }
    }

    pub fn detect(
        &self,
        request: &ServiceRequest,
        strategy: &DetectionStrategy,
    ) -> Result<RunningState> {
        if let Some(pattern) = request.pattern() {
            let state = self.scan_processes(pattern)?;
            if state.is_known() {
                tracing::debug!(service = request.name(), state = %state, "Status taken from process table");
                return Ok(state);
            }
        }

        let runner = self.host.runner;
        let status = strategy.status.run(runner)?;
        let init_query = match &strategy.init_query {
            Some(query) => Some(query.run(runner)?),
            None => None,
        };
        let special_cases = self.host.config.special_case_table();

        let evidence = StatusEvidence {
            name: request.name(),
            status: &status,
            init_query: init_query.as_ref(),
            special_cases: &special_cases,
        };
        Ok(resolve(strategy.cascade, &evidence))
    }

    /// Look for `pattern` in a full process listing.
    ///
    /// # Errors
    ///
    /// Fails if `ps` is not installed. A listing that exits non-zero yields
    /// [`RunningState::Unknown`].
    pub fn scan_processes(&self, pattern: &str) -> Result<RunningState> {
        let ps = self
            .host
            .locator
            .locate("ps")
            .ok_or_else(|| Error::tool_discovery("unable to find ps binary"))?;

        let listing = Invocation::new(ps)
            .arg(self.host.identity.ps_flags())
            .run(self.host.runner)?;
        if !listing.is_success() {
            tracing::warn!(
                code = listing.code,
                "Process listing failed; falling back to status command"
            );
            return Ok(RunningState::Unknown);
        }

        Ok(RunningState::from_running(listing_matches(
            &listing.stdout,
            pattern,
            &self.host.config.pattern_flag,
        )))
    }
}

/// Whether any line holds `pattern` without also holding `exclude`.
///
/// `exclude` filters out the process that was handed the pattern on its
/// command line. An empty `exclude` filters nothing.
pub fn listing_matches(listing: &str, pattern: &str, exclude: &str) -> bool {
    listing
        .lines()
        .any(|line| line.contains(pattern) && (exclude.is_empty() || !line.contains(exclude)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn evidence<'a>(
        name: &'a str,
        status: &'a CommandResult,
        init_query: Option<&'a CommandResult>,
        special_cases: &'a [SpecialCase],
    ) -> StatusEvidence<'a> {
        StatusEvidence {
            name,
            status,
            init_query,
            special_cases,
        }
    }

    #[rstest]
    #[case(0, Some(RunningState::Running))]
    #[case(2, Some(RunningState::NotRunning))]
    #[case(3, Some(RunningState::NotRunning))]
    #[case(1, None)]
    #[case(4, None)]
    fn linux_exit_codes(#[case] code: i32, #[case] expected: Option<RunningState>) {
        let status = CommandResult::new(code, "", "");
        let evidence = evidence("nginx", &status, None, &[]);
        assert_eq!(Heuristic::ExitCodes(LINUX_EXIT_CODES).evaluate(&evidence), expected);
    }

    #[rstest]
    #[case(0, Some(RunningState::Running))]
    #[case(1, Some(RunningState::NotRunning))]
    #[case(3, None)]
    fn bsd_exit_codes(#[case] code: i32, #[case] expected: Option<RunningState>) {
        let status = CommandResult::new(code, "", "");
        let evidence = evidence("sshd", &status, None, &[]);
        assert_eq!(Heuristic::ExitCodes(BSD_EXIT_CODES).evaluate(&evidence), expected);
    }

    #[rstest]
    #[case("nginx stop/waiting", Some(RunningState::NotRunning))]
    #[case("nginx start/running, process 812", Some(RunningState::Running))]
    #[case("Unknown job: nginx", None)]
    fn init_query_phrases(#[case] stdout: &str, #[case] expected: Option<RunningState>) {
        let status = CommandResult::new(1, "", "");
        let query = CommandResult::new(0, stdout, "");
        let evidence = evidence("nginx", &status, Some(&query), &[]);
        assert_eq!(Heuristic::InitQueryPhrases.evaluate(&evidence), expected);
    }

    #[test]
    fn init_query_absent() {
        let status = CommandResult::new(0, "start/running", "");
        let evidence = evidence("nginx", &status, None, &[]);
        assert_eq!(Heuristic::InitQueryPhrases.evaluate(&evidence), None);
    }

    #[rstest]
    #[case("Service is stopped", Some(RunningState::NotRunning))]
    #[case("apache2 is not running", Some(RunningState::NotRunning))]
    #[case("sshd is running", Some(RunningState::Running))]
    #[case("Service started", Some(RunningState::Running))]
    #[case("PID 42 dead but subsys locked", Some(RunningState::NotRunning))]
    #[case("could not access PID file for foo", Some(RunningState::NotRunning))]
    #[case("Everything looks fine", None)]
    fn status_keywords(#[case] stdout: &str, #[case] expected: Option<RunningState>) {
        let status = CommandResult::new(1, stdout, "");
        let evidence = evidence("svc", &status, None, &[]);
        assert_eq!(Heuristic::StatusKeywords.evaluate(&evidence), expected);
    }

    #[test]
    fn status_keywords_ignore_service_name() {
        // "runner" would otherwise read as "run"
        let status = CommandResult::new(1, "gitlab-runner: active", "");
        let evidence = evidence("gitlab-runner", &status, None, &[]);
        assert_eq!(Heuristic::StatusKeywords.evaluate(&evidence), None);
    }

    #[test]
    fn special_case_keyed_on_service() {
        let rules = vec![SpecialCase::new("iptables", "ACCEPT", true)];
        let status = CommandResult::new(1, "Chain INPUT (policy ACCEPT)", "");

        let matched = evidence("iptables", &status, None, &rules);
        assert_eq!(
            Heuristic::SpecialCases.evaluate(&matched),
            Some(RunningState::Running)
        );

        let other = evidence("nftables", &status, None, &rules);
        assert_eq!(Heuristic::SpecialCases.evaluate(&other), None);
    }

    #[test]
    fn cascade_first_answer_wins() {
        // exit code says running, keywords would say stopped
        let status = CommandResult::new(0, "stopped", "");
        let evidence = evidence("nginx", &status, None, &[]);
        assert_eq!(resolve(LINUX_CASCADE, &evidence), RunningState::Running);
    }

    #[test]
    fn cascade_init_query_beats_exit_code() {
        let status = CommandResult::new(0, "", "");
        let query = CommandResult::new(0, "nginx stop/waiting", "");
        let evidence = evidence("nginx", &status, Some(&query), &[]);
        assert_eq!(resolve(LINUX_CASCADE, &evidence), RunningState::NotRunning);
    }

    #[test]
    fn cascade_can_stay_unknown() {
        let status = CommandResult::new(4, "???", "");
        let evidence = evidence("nginx", &status, None, &[]);
        assert_eq!(resolve(LINUX_CASCADE, &evidence), RunningState::Unknown);
        assert_eq!(resolve(BSD_CASCADE, &evidence), RunningState::Unknown);
    }

    #[test]
    fn bsd_cascade_ignores_keywords() {
        let status = CommandResult::new(7, "sshd is running as pid 12", "");
        let evidence = evidence("sshd", &status, None, &[]);
        assert_eq!(resolve(BSD_CASCADE, &evidence), RunningState::Unknown);
    }

    #[test]
    fn listing_excludes_own_invocation() {
        let listing = "\
root  1  init
root 77  svcctl nginx --pattern nginx: master
";
        assert!(!listing_matches(listing, "nginx: master", "--pattern"));

        let listing = format!("{}www 80  nginx: master process\n", listing);
        assert!(listing_matches(&listing, "nginx: master", "--pattern"));
    }

    #[test]
    fn listing_with_empty_exclude() {
        assert!(listing_matches("a nginx b\n", "nginx", ""));
        assert!(!listing_matches("a b\n", "nginx", ""));
    }
}
