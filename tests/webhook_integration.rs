//! Webhook delivery against a real HTTP server in a container.

use std::time::{Duration, Instant};

use chrono::Utc;
use testcontainers::core::IntoContainerPort;
use testcontainers::runners::SyncRunner;
use testcontainers::{Container, GenericImage, ImageExt, TestcontainersError};

use campus_route_planner::notify::Notification;
use campus_route_planner::traits::NotificationSink;
use campus_route_planner::webhook::{WebhookConfig, WebhookNotifier};
use campus_route_planner::{Location, PlannerConfig};

/// HTTP echo server that answers 200 to any request.
fn echo_container() -> Result<(Container<GenericImage>, String), TestcontainersError> {
    let image = GenericImage::new("mendhak/http-https-echo", "34")
        .with_exposed_port(8080.tcp())
        .with_startup_timeout(Duration::from_secs(30));

    let container = image.start()?;
    let port = container.get_host_port_ipv4(8080.tcp())?;
    let url = format!("http://127.0.0.1:{}/notifications", port);

    Ok((container, url))
}

#[test]
#[ignore = "requires a docker daemon"]
fn webhook_posts_notification() {
    let (container, url) = echo_container().expect("start echo container");

    let notifier = WebhookNotifier::new(WebhookConfig {
        url: url.clone(),
        timeout_secs: 5,
    })
    .expect("build webhook client");

    let plan = campus_route_planner::construct::construct_route(
        "courier-1",
        &Location::new("depot", 39.9042, 116.4074),
        &[Location::new("a", 39.9052, 116.4084)],
        Utc::now(),
        &PlannerConfig::default(),
    );
    let event = Notification::route_optimized(&plan);

    let delivered = {
        let start = Instant::now();
        let mut last = notifier.deliver(&event);
        while last.is_err() && start.elapsed() < Duration::from_secs(15) {
            std::thread::sleep(Duration::from_millis(500));
            last = notifier.deliver(&event);
        }
        last
    };
    if let Err(err) = &delivered {
        eprintln!("webhook error: {}", err);
        if let Ok(stderr) = container.stderr_to_vec() {
            if !stderr.is_empty() {
                eprintln!("echo stderr:\n{}", String::from_utf8_lossy(&stderr));
            }
        }
    }
    assert!(delivered.is_ok());

    // The sink form must not panic either way
    notifier.notify(&event);

    drop(container);
}
