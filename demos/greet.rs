//! Minimal walkthrough of the emitter: persistent, once and removed
//! handlers, plus a faulting one.
//!
//! Run with: `cargo run --example greet`

use eventry::{Args, Emitter, HandlerResult};
use serde_json::json;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let bus = Emitter::new();

    bus.on("greet", |args: &Args| -> HandlerResult {
        println!("[every time] hello, {}", args[0]);
        Ok(())
    })
    .expect("register greet handler");

    bus.once("greet", |args: &Args| -> HandlerResult {
        println!("[first time only] welcome, {}", args[0]);
        Ok(())
    })
    .expect("register once handler");

    let grumpy = bus
        .on("greet", |_: &Args| -> HandlerResult {
            Err("not in the mood".into())
        })
        .expect("register grumpy handler");

    println!("listeners before: {}", bus.listener_count("greet"));

    if let Err(err) = bus.emit("greet", &[json!("world")]) {
        println!("pass completed with faults: {}", err.as_message());
    }

    bus.off(&grumpy);
    bus.emit("greet", &[json!("again")]).expect("clean pass");

    println!("listeners after: {}", bus.listener_count("greet"));
}
