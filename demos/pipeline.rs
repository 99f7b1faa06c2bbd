// In demos/pipeline.rs
//
// One producer thread hashes "message_<n>" and sends "<n>:<sha256>" frames;
// one consumer thread re-hashes and checks every frame it receives.
// Ctrl+C closes the queue, which wakes the blocked consumer.
use osal_queues::{QueueBuilder, QueueError};
use sha2::{Digest, Sha256};
use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn digest_of(index: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("message_{}", index).as_bytes());
    format!("{:x}", hasher.finalize())
}

fn main() -> Result<(), QueueError> {
    let args: Vec<String> = env::args().collect();
    let num_messages: usize = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(10_000);

    let producer = QueueBuilder::new("pipeline")
        .with_depth(64)
        .with_max_message_size(96)
        .build_producer()?;
    let consumer = QueueBuilder::new("pipeline").build_consumer()?;

    let running = Arc::new(AtomicBool::new(true));
    let running_for_handler = Arc::clone(&running);
    ctrlc::set_handler(move || {
        running_for_handler.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    let reader = thread::spawn(move || {
        let mut verified = 0usize;
        loop {
            match consumer.receive_blocking() {
                Ok(data) => {
                    let message = String::from_utf8_lossy(&data);
                    match message.split_once(':') {
                        Some((num, hash)) if num.parse().map(digest_of).as_deref() == Ok(hash) => {
                            verified += 1;
                        }
                        _ => eprintln!("Consumer: corrupt frame {}", message),
                    }
                }
                Err(QueueError::QueueClosed) => break,
                Err(e) => {
                    eprintln!("Consumer: receive failed: {}", e);
                    break;
                }
            }
        }
        verified
    });

    println!("Producer: sending {} hashed messages", num_messages);
    let start = Instant::now();
    let mut sent = 0usize;

    'outer: for i in 0..num_messages {
        let message = format!("{}:{}", i, digest_of(i));
        loop {
            if !running.load(Ordering::SeqCst) {
                break 'outer;
            }
            match producer.send(&message) {
                Ok(()) => {
                    sent += 1;
                    break;
                }
                Err(QueueError::QueueFull) => thread::sleep(Duration::from_micros(10)),
                Err(e) => {
                    eprintln!("Producer: failed to send message {}: {}", i, e);
                    break 'outer;
                }
            }
        }
    }

    // Give the consumer a moment to drain before closing
    thread::sleep(Duration::from_millis(200));
    producer.close()?;

    let verified = reader.join().unwrap_or(0);
    let elapsed = start.elapsed();
    println!("Producer: sent {} messages in {:.2?}", sent, elapsed);
    println!("Consumer: verified {} messages", verified);
    println!(
        "Throughput: {:.2} messages/sec",
        sent as f64 / elapsed.as_secs_f64()
    );

    Ok(())
}
