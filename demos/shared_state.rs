use sovran_variant::{Handle, OneOf, SharedOneOf, VariantError, Visitor};
use std::thread;
use std::time::Duration;

// Connection state shared between a worker and a monitor thread
#[derive(Clone, Debug)]
struct Connecting {
    attempt: u32,
}

#[derive(Clone, Debug)]
struct Connected {
    peer: String,
}

#[derive(Clone, Debug)]
struct Failed {
    reason: String,
}

type State = (Connecting, Connected, Failed);

struct Describe;

impl Visitor for Describe {
    type Result = String;
}

impl Handle<Connecting> for Describe {
    fn handle(&mut self, value: &Connecting) -> String {
        format!("connecting (attempt {})", value.attempt)
    }
}

impl Handle<Connected> for Describe {
    fn handle(&mut self, value: &Connected) -> String {
        format!("connected to {}", value.peer)
    }
}

impl Handle<Failed> for Describe {
    fn handle(&mut self, value: &Failed) -> String {
        format!("failed: {}", value.reason)
    }
}

fn main() -> Result<(), VariantError> {
    let state = SharedOneOf::<State>::from(OneOf::of::<0>(Connecting { attempt: 1 }));

    let worker = state.clone();
    let handle = thread::spawn(move || -> Result<(), VariantError> {
        for attempt in 2..=3 {
            thread::sleep(Duration::from_millis(10));
            worker.set::<0>(Connecting { attempt })?;
        }
        worker.set::<1>(Connected {
            peer: "10.0.0.7:4000".to_string(),
        })
    });

    for _ in 0..4 {
        println!("Monitor sees: {}", state.visit(&mut Describe)?);
        thread::sleep(Duration::from_millis(8));
    }

    match handle.join() {
        Ok(result) => result?,
        Err(_) => println!("Worker thread panicked"),
    }

    println!("Final state: {}", state.visit(&mut Describe)?);

    state.set::<2>(Failed {
        reason: "peer closed the connection".to_string(),
    })?;
    println!("After drop: {}", state.visit(&mut Describe)?);

    // Reconnecting reuses the retained Connecting storage
    state.set::<0>(Connecting { attempt: 1 })?;
    let snapshot = state.snapshot()?;
    println!("Snapshot active alternative: {:?}", snapshot.active());
    println!("Last peer: {:?}", snapshot.retained::<1>().map(|c| &c.peer));

    Ok(())
}
