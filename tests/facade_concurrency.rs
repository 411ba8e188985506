use orthanc_gateway::{CallResult, Method, Orthanc, Transport, WorkerPool};
use serial_test::serial;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Answers `modalities/M{n}/echo`, succeeding for even `n`.
///
/// Lower numbers sleep longer so completions arrive out of submission order.
struct SlowEchoTransport {
    count: u64,
}

impl Transport for SlowEchoTransport {
    fn execute(&self, resource: &str, method: Method, _body: &[u8]) -> CallResult {
        assert_eq!(method, Method::Post);
        let n: u64 = resource
            .trim_start_matches("modalities/M")
            .trim_end_matches("/echo")
            .parse()
            .unwrap_or(u64::MAX);
        if n == u64::MAX {
            return CallResult::no_response();
        }
        thread::sleep(Duration::from_millis((self.count - n) * 5));
        if n % 2 == 0 {
            CallResult::found(b"{}".to_vec())
        } else {
            CallResult::failed(resource.as_bytes().to_vec())
        }
    }
}

#[test]
fn concurrent_echoes_keep_their_own_results() {
    const CALLS: u64 = 16;
    let pool = Arc::new(WorkerPool::new(8).unwrap());
    let orthanc = Orthanc::with_transport(SlowEchoTransport { count: CALLS }, pool.clone());

    let pending: Vec<_> = (0..CALLS)
        .map(|n| (n, orthanc.echo(&format!("M{}", n))))
        .collect();

    for (n, handle) in pending {
        let outcome = handle.wait();
        assert!(outcome.success(), "call {} lost its answer", n);
        assert_eq!(*outcome.result(), n % 2 == 0, "call {} got another call's result", n);
    }

    let unknown = orthanc.echo("nowhere").wait();
    assert!(!unknown.success());
}

#[tokio::test(flavor = "multi_thread")]
async fn facade_handles_can_be_awaited_together() {
    let orthanc = Orthanc::with_transport(SlowEchoTransport { count: 4 }, WorkerPool::global());

    let (a, b, c, d) = tokio::join!(
        orthanc.echo("M0"),
        orthanc.echo("M1"),
        orthanc.echo("M2"),
        orthanc.echo("M3")
    );
    assert_eq!(
        [*a.result(), *b.result(), *c.result(), *d.result()],
        [true, false, true, false]
    );
}

#[test]
#[serial]
fn clients_snapshot_the_default_host() {
    orthanc_gateway::set_host("10.1.1.1");
    let first = Orthanc::new();
    assert_eq!(first.target().host, "10.1.1.1");
    assert_eq!(first.target().port, 8042);

    let writer = thread::spawn(|| {
        for i in 0..200 {
            Orthanc::set_host(format!("10.2.0.{}", i % 250));
        }
    });
    for _ in 0..200 {
        assert_eq!(first.target().url_for("modalities"), "http://10.1.1.1:8042/modalities");
    }
    writer.join().unwrap();

    assert!(Orthanc::host().starts_with("10.2.0."));
    let explicit = Orthanc::with_host("pacs.local");
    assert_eq!(explicit.target().host, "pacs.local");

    orthanc_gateway::globals::reset_host();
    assert_eq!(Orthanc::host(), "127.0.0.1");
}
