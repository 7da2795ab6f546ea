use std::sync::atomic::{AtomicUsize, Ordering};

use linelog::{Destination, LogLevel, logger};

fn one_shot_and_error_line() {
    logger().log("Test Log", LogLevel::Debug);
    logger()
        .select(LogLevel::Error)
        .append("Error Log")
        .append(11)
        .end_line();
}

fn iterations() {
    static THREAD_NUM: AtomicUsize = AtomicUsize::new(0);
    for i in 0..10 {
        let n = THREAD_NUM.fetch_add(1, Ordering::Relaxed) + 1;
        logger().append("Test Thread #").append(n);
        logger().append(", Iteration #").append(i + 1).end_line();
    }
}

fn main() {
    println!("Started logging");

    let logger = logger();
    logger.init("/tmp/linelog_example.log", Destination::Everywhere);
    logger.open().expect("Unable to open log file");

    logger.log("test log", LogLevel::Debug);

    let handles: Vec<_> = (0..10)
        .map(|i| {
            std::thread::spawn(if i % 2 == 1 {
                one_shot_and_error_line
            } else {
                iterations
            })
        })
        .collect();

    one_shot_and_error_line();

    // never ended: drained by the blanket flush below
    logger.append(12345);

    for handle in handles {
        handle.join().unwrap();
    }

    logger.flush();
    logger.close();
}
