use std::time::{Duration, Instant};

use super::*;

#[test]
fn test_current_is_newest() {
    let mut notifier = Notifier::default();
    notifier.info("first");
    notifier.error("second");
    let current = notifier.current();
    assert!(current.is_some_and(|n| n.message == "second" && n.level == Level::Error));
}

#[test]
fn test_empty_has_no_current() {
    let notifier = Notifier::default();
    assert!(notifier.current().is_none());
    assert!(notifier.notices().is_empty());
}

#[test]
fn test_expire_drops_old_notices() {
    let mut notifier = Notifier::new(Duration::from_millis(10));
    notifier.success("saved");
    let later = Instant::now() + Duration::from_millis(20);
    notifier.expire(later);
    assert!(notifier.current().is_none());
}

#[test]
fn test_expire_keeps_fresh_notices() {
    let mut notifier = Notifier::new(Duration::from_secs(60));
    notifier.success("saved");
    notifier.expire(Instant::now());
    assert_eq!(notifier.notices().len(), 1);
}

#[test]
fn test_count_by_level() {
    let mut notifier = Notifier::default();
    notifier.error("a");
    notifier.error("b");
    notifier.info("c");
    assert_eq!(notifier.count(Level::Error), 2);
    assert_eq!(notifier.count(Level::Info), 1);
    assert_eq!(notifier.count(Level::Success), 0);
}

#[test]
fn test_drain_empties_in_order() {
    let mut notifier = Notifier::default();
    notifier.info("one");
    notifier.success("two");
    let drained: Vec<String> = notifier.drain().into_iter().map(|n| n.message).collect();
    assert_eq!(drained, vec!["one", "two"]);
    assert!(notifier.notices().is_empty());
}
