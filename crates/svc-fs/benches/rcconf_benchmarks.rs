use criterion::{Criterion, black_box, criterion_group, criterion_main};
use svc_fs::rcconf::{self, BootConfigEntry};
use svc_fs::{io, split_words};
use tempfile::tempdir;

fn sample_rc_conf(lines: usize) -> String {
    let mut content = String::from("# /etc/rc.conf\nhostname=\"bench.local\"\n");
    for i in 0..lines {
        content.push_str(&format!("service{}_enable=\"YES\" # added by installer\n", i));
    }
    content
}

fn lexer_benchmark(c: &mut Criterion) {
    c.bench_function("lexer::split_words", |b| {
        let line = "ifconfig_em0=\"inet 10.0.0.2 netmask 255.255.255.0\" # uplink";
        b.iter(|| split_words(black_box(line)).unwrap())
    });
}

fn plan_benchmark(c: &mut Criterion) {
    let content = sample_rc_conf(200);

    c.bench_function("rcconf::plan (append)", |b| {
        b.iter(|| rcconf::plan(black_box(&content), "nginx_enable", "YES"))
    });

    c.bench_function("rcconf::plan (replace last)", |b| {
        b.iter(|| rcconf::plan(black_box(&content), "service199_enable", "NO"))
    });
}

fn upsert_benchmark(c: &mut Criterion) {
    c.bench_function("rcconf::upsert (toggle)", |b| {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rc.conf");
        io::write_atomic(&path, sample_rc_conf(50).as_bytes()).unwrap();
        let on = BootConfigEntry::new(&path, "nginx_enable", "YES");
        let off = BootConfigEntry::new(&path, "nginx_enable", "NO");

        b.iter(|| {
            rcconf::upsert(black_box(&on)).unwrap();
            rcconf::upsert(black_box(&off)).unwrap();
        })
    });
}

criterion_group!(benches, lexer_benchmark, plan_benchmark, upsert_benchmark);
criterion_main!(benches);
