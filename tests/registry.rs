use osal_queues::{Creator, QueueError, QueueFlags, QueueRegistry, RegistryConfig, Timeout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

const FIXED: QueueFlags = QueueFlags::empty();
const CREATOR: Creator = Creator(7);

fn registry() -> QueueRegistry {
    QueueRegistry::new(RegistryConfig::new().with_max_queues(4))
}

#[test]
fn fixed_size_scenario() {
    let reg = registry();
    let id = reg.create("Q1", 2, 8, FIXED, CREATOR).unwrap();

    assert_eq!(reg.put(id, b"ABCDEFGH"), Ok(()));
    assert_eq!(reg.put(id, b"IJKLMNOP"), Ok(()));
    assert_eq!(reg.put(id, b"QRSTUVWX"), Err(QueueError::QueueFull));

    let mut buf = [0u8; 8];
    assert_eq!(reg.get(id, &mut buf, Timeout::Check), Ok(8));
    assert_eq!(&buf, b"ABCDEFGH");
    assert_eq!(reg.get(id, &mut buf, Timeout::Check), Ok(8));
    assert_eq!(&buf, b"IJKLMNOP");
    assert_eq!(reg.get(id, &mut buf, Timeout::Check), Err(QueueError::QueueEmpty));
}

#[test]
fn duplicate_name_is_rejected() {
    let reg = registry();
    reg.create("telemetry", 4, 16, FIXED, CREATOR).unwrap();
    let before = reg.occupied();

    assert_eq!(
        reg.create("telemetry", 4, 16, FIXED, CREATOR),
        Err(QueueError::NameTaken)
    );
    assert_eq!(reg.occupied(), before);
}

#[test]
fn name_length_bound_includes_terminator() {
    let reg = registry();
    let max = reg.config().max_name_len;

    let too_long = "x".repeat(max);
    assert_eq!(
        reg.create(&too_long, 1, 1, FIXED, CREATOR),
        Err(QueueError::NameTooLong)
    );
    assert_eq!(reg.get_id_by_name(&too_long), Err(QueueError::NameTooLong));

    let longest = "x".repeat(max - 1);
    assert!(reg.create(&longest, 1, 1, FIXED, CREATOR).is_ok());
}

#[test]
fn table_exhaustion_returns_no_free_ids() {
    let reg = registry();
    for i in 0..4 {
        reg.create(&format!("q{}", i), 1, 4, FIXED, CREATOR).unwrap();
    }
    assert_eq!(
        reg.create("one-more", 1, 4, FIXED, CREATOR),
        Err(QueueError::NoFreeIds)
    );
    // A full table reports NoFreeIds before it looks at names
    assert_eq!(
        reg.create("q0", 1, 4, FIXED, CREATOR),
        Err(QueueError::NoFreeIds)
    );
}

#[test]
fn failed_allocation_rolls_back_reservation() {
    let reg = registry();
    assert!(matches!(
        reg.create("empty", 0, 8, FIXED, CREATOR),
        Err(QueueError::InvalidParameter(_))
    ));
    assert_eq!(
        reg.create("huge", usize::MAX, 8, FIXED, CREATOR),
        Err(QueueError::InvalidParameter("queue depth exceeds semaphore range"))
    );
    assert_eq!(reg.occupied(), 0);
    assert_eq!(reg.get_id_by_name("empty"), Err(QueueError::NameNotFound));

    // The name is usable again
    assert!(reg.create("empty", 1, 8, FIXED, CREATOR).is_ok());
}

#[test]
fn fifo_order_and_sizes_preserved() {
    let reg = registry();
    let id = reg
        .create("fifo", 8, 16, QueueFlags::VARIABLE_SIZE, CREATOR)
        .unwrap();

    let messages: Vec<Vec<u8>> = (0..8u8).map(|i| vec![i; (i as usize) + 1]).collect();
    for msg in &messages {
        reg.put(id, msg).unwrap();
    }

    let mut buf = [0u8; 16];
    for msg in &messages {
        let len = reg.get(id, &mut buf, Timeout::Check).unwrap();
        assert_eq!(len, msg.len());
        assert_eq!(&buf[..len], &msg[..]);
    }
}

#[test]
fn capacity_boundary() {
    let reg = registry();
    let id = reg.create("bounded", 3, 4, FIXED, CREATOR).unwrap();
    for _ in 0..3 {
        reg.put(id, b"full").unwrap();
    }
    assert_eq!(reg.put(id, b"full"), Err(QueueError::QueueFull));
    assert_eq!(reg.stats(id).unwrap().count, 3);
}

#[test]
fn fixed_size_enforced_on_put() {
    let reg = registry();
    let id = reg.create("fixed", 4, 8, FIXED, CREATOR).unwrap();
    assert_eq!(reg.put(id, b"abcd"), Err(QueueError::InvalidSize));
    assert_eq!(reg.put(id, b"abcdefghi"), Err(QueueError::InvalidSize));
    assert_eq!(reg.stats(id).unwrap().count, 0);
}

#[test]
fn variable_size_still_bounded() {
    let reg = registry();
    let id = reg
        .create("var", 4, 8, QueueFlags::VARIABLE_SIZE, CREATOR)
        .unwrap();
    assert_eq!(reg.put(id, b"abcd"), Ok(()));
    assert_eq!(reg.put(id, b""), Ok(()));
    assert_eq!(reg.put(id, b"abcdefghi"), Err(QueueError::InvalidSize));
    assert_eq!(reg.stats(id).unwrap().count, 2);
}

#[test]
fn fixed_size_get_needs_exact_buffer() {
    let reg = registry();
    let id = reg.create("exact", 2, 8, FIXED, CREATOR).unwrap();
    reg.put(id, b"ABCDEFGH").unwrap();
    reg.put(id, b"IJKLMNOP").unwrap();

    // A larger buffer still gets the bytes, and the message is gone
    let mut wide = [0u8; 16];
    assert_eq!(
        reg.get(id, &mut wide, Timeout::Check),
        Err(QueueError::MessageSize { copied: 8 })
    );
    assert_eq!(&wide[..8], b"ABCDEFGH");
    assert_eq!(reg.stats(id).unwrap().count, 1);

    let mut exact = [0u8; 8];
    assert_eq!(reg.get(id, &mut exact, Timeout::Check), Ok(8));
    assert_eq!(&exact, b"IJKLMNOP");
}

#[test]
fn variable_size_get_accepts_larger_buffer() {
    let reg = registry();
    let id = reg
        .create("roomy", 2, 8, QueueFlags::VARIABLE_SIZE, CREATOR)
        .unwrap();
    reg.put(id, b"ABCDEFGH").unwrap();

    let mut wide = [0u8; 16];
    assert_eq!(reg.get(id, &mut wide, Timeout::Check), Ok(8));
}

#[test]
fn check_on_empty_changes_nothing() {
    let reg = registry();
    let id = reg.create("idle", 2, 4, FIXED, CREATOR).unwrap();
    reg.put(id, b"abcd").unwrap();
    let mut buf = [0u8; 4];
    reg.get(id, &mut buf, Timeout::Check).unwrap();

    let before = reg.stats(id).unwrap();
    assert_eq!(reg.get(id, &mut buf, Timeout::Check), Err(QueueError::QueueEmpty));
    assert_eq!(reg.stats(id).unwrap(), before);
}

#[test]
fn short_destination_consumes_message() {
    let reg = registry();
    let id = reg
        .create("short", 2, 8, QueueFlags::VARIABLE_SIZE, CREATOR)
        .unwrap();
    reg.put(id, b"ABCDEFGH").unwrap();
    reg.put(id, b"xy").unwrap();

    let mut small = [0u8; 4];
    assert_eq!(
        reg.get(id, &mut small, Timeout::Check),
        Err(QueueError::MessageSize { copied: 4 })
    );
    assert_eq!(&small, b"ABCD");
    assert_eq!(reg.stats(id).unwrap().count, 1);

    let mut buf = [0u8; 8];
    assert_eq!(reg.get(id, &mut buf, Timeout::Check), Ok(2));
    assert_eq!(&buf[..2], b"xy");
}

#[test]
fn delete_frees_slot_for_reuse() {
    let reg = registry();
    let id = reg.create("old", 2, 4, FIXED, CREATOR).unwrap();
    reg.put(id, b"left").unwrap();

    reg.delete(id).unwrap();
    assert_eq!(reg.occupied(), 0);
    assert_eq!(reg.delete(id), Err(QueueError::InvalidId));
    assert_eq!(reg.put(id, b"gone"), Err(QueueError::InvalidId));
    assert_eq!(reg.get_info(id), Err(QueueError::InvalidId));

    let reused = reg.create("new", 2, 4, FIXED, CREATOR).unwrap();
    assert_eq!(reused, id);
    let stats = reg.stats(reused).unwrap();
    assert_eq!((stats.count, stats.head, stats.tail), (0, 0, 0));

    let mut buf = [0u8; 4];
    assert_eq!(reg.get(reused, &mut buf, Timeout::Check), Err(QueueError::QueueEmpty));
}

#[test]
fn contains_tracks_live_queues() {
    let reg = registry();
    assert!(!reg.contains(0));
    let id = reg.create("live", 1, 4, FIXED, CREATOR).unwrap();
    assert!(reg.contains(id));
    assert!(!reg.contains(99));
    reg.delete(id).unwrap();
    assert!(!reg.contains(id));
}

#[test]
fn live_queue_always_has_metadata() {
    // Without deletes, any id the data path can see must also be visible
    // to get_info, even while create is still running
    for _ in 0..50 {
        let reg = Arc::new(registry());
        let done = Arc::new(AtomicBool::new(false));

        let observer = {
            let reg = Arc::clone(&reg);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                while !done.load(Ordering::Acquire) {
                    for id in 0..4 {
                        if reg.contains(id) {
                            assert!(reg.get_info(id).is_ok(), "id {} live without metadata", id);
                        }
                    }
                }
            })
        };

        for i in 0..4 {
            reg.create(&format!("q{}", i), 64, 64, FIXED, CREATOR).unwrap();
        }
        done.store(true, Ordering::Release);
        observer.join().unwrap();
    }
}

#[test]
fn lookups_by_name_and_id() {
    let reg = registry();
    let a = reg.create("alpha", 1, 4, FIXED, Creator(11)).unwrap();
    let b = reg.create("beta", 1, 4, FIXED, Creator(22)).unwrap();

    assert_eq!(reg.get_id_by_name("alpha"), Ok(a));
    assert_eq!(reg.get_id_by_name("beta"), Ok(b));
    assert_eq!(reg.get_id_by_name("gamma"), Err(QueueError::NameNotFound));

    let info = reg.get_info(b).unwrap();
    assert_eq!(info.name, "beta");
    assert_eq!(info.creator, Creator(22));

    reg.delete(a).unwrap();
    assert_eq!(reg.get_id_by_name("alpha"), Err(QueueError::NameNotFound));
}

#[test]
fn out_of_range_ids_are_invalid() {
    let reg = registry();
    let mut buf = [0u8; 4];
    assert_eq!(reg.put(4, b"abcd"), Err(QueueError::InvalidId));
    assert_eq!(reg.get(99, &mut buf, Timeout::Check), Err(QueueError::InvalidId));
    assert_eq!(reg.delete(u32::MAX), Err(QueueError::InvalidId));
    assert_eq!(reg.get_info(4), Err(QueueError::InvalidId));
}

#[test]
fn debug_output_is_readable() {
    let reg = registry();
    let id = reg.create("dbg", 2, 4, FIXED, CREATOR).unwrap();
    let text = format!("{:?}", reg);
    assert!(text.contains("occupied: 1"));

    let object = reg.object(id).unwrap();
    let text = format!("{:?}", object);
    assert!(text.contains("capacity: 2"));
}
