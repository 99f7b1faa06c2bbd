use osal_queues::{Creator, QueueError, QueueFlags, QueueRegistry, RegistryConfig, Timeout};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn registry() -> Arc<QueueRegistry> {
    Arc::new(QueueRegistry::new(RegistryConfig::new().with_max_queues(8)))
}

#[test]
fn pend_returns_after_matching_put() {
    let reg = registry();
    let id = reg
        .create("pend", 4, 32, QueueFlags::VARIABLE_SIZE, Creator(1))
        .unwrap();

    let consumer = {
        let reg = reg.clone();
        thread::spawn(move || {
            let mut buf = [0u8; 32];
            let len = reg.get(id, &mut buf, Timeout::Pend)?;
            Ok::<_, QueueError>(buf[..len].to_vec())
        })
    };

    thread::sleep(Duration::from_millis(100));
    assert!(!consumer.is_finished());

    reg.put(id, b"wake up").unwrap();
    assert_eq!(consumer.join().unwrap().unwrap(), b"wake up".to_vec());
    assert_eq!(reg.stats(id).unwrap().count, 0);
}

#[test]
fn timed_get_times_out_on_empty_queue() {
    let reg = registry();
    let id = reg
        .create("timed", 2, 8, QueueFlags::VARIABLE_SIZE, Creator(1))
        .unwrap();

    let mut buf = [0u8; 8];
    let start = Instant::now();
    assert_eq!(
        reg.get(id, &mut buf, Timeout::Millis(80)),
        Err(QueueError::QueueTimeout)
    );
    assert!(start.elapsed() >= Duration::from_millis(80));
}

#[test]
fn timed_get_returns_message_put_before_deadline() {
    let reg = registry();
    let id = reg
        .create("timed-ok", 2, 8, QueueFlags::VARIABLE_SIZE, Creator(1))
        .unwrap();

    let producer = {
        let reg = reg.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            reg.put(id, b"late").unwrap();
        })
    };

    let mut buf = [0u8; 8];
    assert_eq!(reg.get(id, &mut buf, Timeout::Millis(5_000)), Ok(4));
    assert_eq!(&buf[..4], b"late");
    producer.join().unwrap();
}

#[test]
fn delete_wakes_blocked_consumers() {
    let reg = registry();
    let id = reg
        .create("doomed", 2, 8, QueueFlags::VARIABLE_SIZE, Creator(1))
        .unwrap();

    let consumers: Vec<_> = (0..3)
        .map(|i| {
            let reg = reg.clone();
            thread::spawn(move || {
                let mut buf = [0u8; 8];
                let timeout = if i == 0 { Timeout::Millis(10_000) } else { Timeout::Pend };
                reg.get(id, &mut buf, timeout)
            })
        })
        .collect();

    thread::sleep(Duration::from_millis(100));
    reg.delete(id).unwrap();

    for consumer in consumers {
        assert_eq!(consumer.join().unwrap(), Err(QueueError::QueueClosed));
    }
}

#[test]
fn unrelated_queues_do_not_block_each_other() {
    let reg = registry();
    let slow = reg
        .create("slow", 1, 8, QueueFlags::VARIABLE_SIZE, Creator(1))
        .unwrap();
    let fast = reg
        .create("fast", 1, 8, QueueFlags::VARIABLE_SIZE, Creator(1))
        .unwrap();

    let waiter = {
        let reg = reg.clone();
        thread::spawn(move || {
            let mut buf = [0u8; 8];
            reg.get(slow, &mut buf, Timeout::Pend)
        })
    };

    thread::sleep(Duration::from_millis(50));
    // A consumer parked on `slow` leaves `fast` fully usable
    let mut buf = [0u8; 8];
    reg.put(fast, b"ping").unwrap();
    assert_eq!(reg.get(fast, &mut buf, Timeout::Check), Ok(4));

    reg.put(slow, b"pong").unwrap();
    assert_eq!(waiter.join().unwrap(), Ok(4));
}

#[test]
fn many_producers_many_consumers() {
    let reg = registry();
    let id = reg
        .create("mpmc", 16, 8, QueueFlags::empty(), Creator(1))
        .unwrap();

    let producers = 4;
    let consumers = 4;
    let per_producer = 2_000;
    let total = producers * per_producer;
    let received = Arc::new(AtomicUsize::new(0));

    let mut handles = vec![];
    for p in 0..producers {
        let reg = reg.clone();
        handles.push(thread::spawn(move || {
            for i in 0..per_producer {
                let msg = (((p as u64) << 32) | i as u64).to_le_bytes();
                loop {
                    match reg.put(id, &msg) {
                        Ok(()) => break,
                        Err(QueueError::QueueFull) => thread::yield_now(),
                        Err(e) => panic!("put failed: {:?}", e),
                    }
                }
            }
            Vec::new()
        }));
    }

    for _ in 0..consumers {
        let reg = reg.clone();
        let received = received.clone();
        handles.push(thread::spawn(move || {
            let mut seen = Vec::new();
            let mut buf = [0u8; 8];
            while received.load(Ordering::Acquire) < total {
                match reg.get(id, &mut buf, Timeout::Millis(20)) {
                    Ok(8) => {
                        seen.push(u64::from_le_bytes(buf));
                        received.fetch_add(1, Ordering::AcqRel);
                    }
                    Err(QueueError::QueueTimeout) => {}
                    other => panic!("get failed: {:?}", other),
                }
            }
            seen
        }));
    }

    let mut all = Vec::with_capacity(total);
    for h in handles {
        all.extend(h.join().unwrap());
    }

    assert_eq!(all.len(), total);
    let unique: HashSet<u64> = all.iter().copied().collect();
    assert_eq!(unique.len(), total);

    let stats = reg.stats(id).unwrap();
    assert_eq!(stats.count, 0);
    assert_eq!(reg.object(id).unwrap().pending_signals(), 0);
}

#[test]
fn single_producer_order_survives_concurrency() {
    let reg = registry();
    let id = reg
        .create("ordered", 4, 4, QueueFlags::empty(), Creator(1))
        .unwrap();
    let count = 5_000u32;

    let producer = {
        let reg = reg.clone();
        thread::spawn(move || {
            for i in 0..count {
                while reg.put(id, &i.to_le_bytes()) == Err(QueueError::QueueFull) {
                    thread::yield_now();
                }
            }
        })
    };

    let mut buf = [0u8; 4];
    for expected in 0..count {
        assert_eq!(reg.get(id, &mut buf, Timeout::Pend), Ok(4));
        assert_eq!(u32::from_le_bytes(buf), expected);
    }
    producer.join().unwrap();
}
