use std::time::{Duration, Instant};

use density_strip::api::{ChartPropsPatch, DEFAULT_SAMPLES};
use density_strip::platform::{
    ChartContainer, ContainerConfig, Debouncer, INITIAL_BANDWIDTH, INITIAL_POINT, WindowEvents,
};
use density_strip::render::Document;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn host(width: f64) -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    doc.set_layout_width(root, width).expect("width");
    doc
}

#[test]
fn debouncer_collapses_bursts_into_one_trailing_fire() {
    let t0 = Instant::now();
    let mut debouncer = Debouncer::new(ms(250));

    debouncer.trigger(t0);
    debouncer.trigger(t0 + ms(100));
    debouncer.trigger(t0 + ms(200));

    assert_eq!(debouncer.deadline(), Some(t0 + ms(450)));
    assert!(!debouncer.poll(t0 + ms(300)));
    assert!(debouncer.poll(t0 + ms(450)));
    assert!(!debouncer.poll(t0 + ms(900)));
    assert!(!debouncer.is_pending());
}

#[test]
fn debouncer_ignores_out_of_order_events_and_can_cancel() {
    let t0 = Instant::now();
    let mut debouncer = Debouncer::default();
    assert_eq!(debouncer.interval(), ms(250));

    debouncer.trigger(t0 + ms(100));
    debouncer.trigger(t0);
    assert_eq!(debouncer.deadline(), Some(t0 + ms(350)));

    debouncer.cancel();
    assert!(!debouncer.poll(t0 + ms(1_000)));
}

#[test]
fn window_events_fan_out_until_unsubscribed() {
    let mut window = WindowEvents::new();
    let first = window.subscribe_resize();
    let second = window.subscribe_resize();
    assert_ne!(first.id(), second.id());

    let t0 = Instant::now();
    assert_eq!(window.dispatch_resize(t0), 2);
    assert!(window.unsubscribe(&first));
    assert!(!window.unsubscribe(&first));
    assert_eq!(window.dispatch_resize(t0 + ms(5)), 1);

    assert_eq!(first.drain(), vec![t0]);
    assert_eq!(second.drain(), vec![t0, t0 + ms(5)]);
    assert!(second.drain().is_empty());
}

#[test]
fn mount_builds_container_and_draws_initial_chart() {
    let mut doc = host(640.0);
    let root = doc.root();
    let mut window = WindowEvents::new();
    let mut container = ChartContainer::default();

    let mount_point = container
        .mount(&mut doc, root, &mut window)
        .expect("mount");

    assert!(doc.select(root, "div.chart-container").expect("select").is_some());
    assert_eq!(doc.select(root, "#chart").expect("select"), Some(mount_point));
    assert_eq!(window.resize_listener_count(), 1);

    let strip = container.strip();
    assert_eq!(strip.point(), Some(INITIAL_POINT));
    assert_eq!(strip.data(), Some(&DEFAULT_SAMPLES[..]));
    assert_eq!(
        strip.props(),
        Some(&ChartPropsPatch::default().with_bandwidth(INITIAL_BANDWIDTH))
    );

    let svg = doc.select(mount_point, "svg").expect("select").expect("svg");
    assert_eq!(doc.attr(svg, "width").expect("attr"), Some("640"));

    let again = container
        .mount(&mut doc, root, &mut window)
        .expect("second mount");
    assert_eq!(again, mount_point);
    assert_eq!(window.resize_listener_count(), 1);
}

#[test]
fn resize_bursts_redraw_once_after_debounce() {
    let mut doc = host(640.0);
    let root = doc.root();
    let mut window = WindowEvents::new();
    let mut container =
        ChartContainer::new(ContainerConfig::default().with_resize_debounce(ms(250)));
    let mount_point = container
        .mount(&mut doc, root, &mut window)
        .expect("mount");

    doc.set_layout_width(root, 900.0).expect("width");
    let t0 = Instant::now();
    window.dispatch_resize(t0);
    window.dispatch_resize(t0 + ms(100));

    assert!(!container.poll(&mut doc, t0 + ms(200)).expect("poll"));
    assert!(container.poll(&mut doc, t0 + ms(350)).expect("poll"));
    assert!(!container.poll(&mut doc, t0 + ms(700)).expect("poll"));

    let svg = doc.select(mount_point, "svg").expect("select").expect("svg");
    assert_eq!(doc.attr(svg, "width").expect("attr"), Some("900"));
}

#[test]
fn prop_changes_flow_to_the_strip() {
    let mut doc = host(500.0);
    let root = doc.root();
    let mut window = WindowEvents::new();
    let mut container = ChartContainer::new(
        ContainerConfig::default()
            .with_initial_point(2.0)
            .with_initial_data(vec![1.0, 2.0, 3.0]),
    );
    container
        .mount(&mut doc, root, &mut window)
        .expect("mount");

    container
        .on_props_changed(
            &mut doc,
            2.5,
            None,
            Some(ChartPropsPatch::default().with_title("Updated")),
        )
        .expect("update");

    assert_eq!(container.strip().point(), Some(2.5));
    assert_eq!(container.strip().data(), Some(&[1.0, 2.0, 3.0][..]));
    let heading = doc.select(root, "h5").expect("select").expect("heading");
    assert_eq!(doc.text(heading).expect("text"), Some("Updated"));
}

#[test]
fn unmount_unsubscribes_and_removes_markup() {
    let mut doc = host(640.0);
    let root = doc.root();
    let mut window = WindowEvents::new();
    let mut container = ChartContainer::default();
    container
        .mount(&mut doc, root, &mut window)
        .expect("mount");

    container.unmount(&mut doc, &mut window).expect("unmount");

    assert!(!container.is_mounted());
    assert!(!container.strip().is_created());
    assert_eq!(window.resize_listener_count(), 0);
    assert!(doc.children(root).expect("children").is_empty());

    let t0 = Instant::now();
    assert_eq!(window.dispatch_resize(t0), 0);
    assert!(!container.poll(&mut doc, t0 + ms(1_000)).expect("poll"));
    container
        .on_props_changed(&mut doc, 1.0, None, None)
        .expect("no-op after unmount");
    container.unmount(&mut doc, &mut window).expect("second unmount");
}

#[test]
fn failed_initial_draw_leaves_host_untouched() {
    let mut doc = host(640.0);
    let root = doc.root();
    let mut window = WindowEvents::new();
    let config = ContainerConfig::default()
        .with_initial_props(ChartPropsPatch::default().with_bandwidth(-1.0));
    let mut container = ChartContainer::new(config);

    for _ in 0..2 {
        assert!(container.mount(&mut doc, root, &mut window).is_err());
        assert!(!container.is_mounted());
        assert!(!container.strip().is_created());
        assert!(doc.children(root).expect("children").is_empty());
        assert_eq!(window.resize_listener_count(), 0);
    }
}

#[test]
fn repeated_mount_cycles_reuse_document_slots() {
    let mut doc = host(640.0);
    let root = doc.root();
    let mut window = WindowEvents::new();
    let mut container = ChartContainer::default();

    container.mount(&mut doc, root, &mut window).expect("mount");
    container.unmount(&mut doc, &mut window).expect("unmount");
    let capacity = doc.capacity();

    for _ in 0..3 {
        container.mount(&mut doc, root, &mut window).expect("mount");
        container.unmount(&mut doc, &mut window).expect("unmount");
    }
    assert_eq!(doc.capacity(), capacity);
}
