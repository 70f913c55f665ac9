use sovran_variant::{Handle, OneOf, Optional, VariantError, Visitor};

// A visitor that turns any stored number into a score
struct Score;

impl Visitor for Score {
    type Result = i64;
}

impl Handle<i64> for Score {
    fn handle(&mut self, value: &i64) -> i64 {
        value * 2
    }
}

impl Handle<bool> for Score {
    fn handle(&mut self, value: &bool) -> i64 {
        if *value {
            32
        } else {
            42
        }
    }
}

fn main() -> Result<(), VariantError> {
    let mut number = OneOf::<(i64, bool)>::of::<0>(11);
    println!("Score for 11: {}", number.visit(&mut Score)?);

    number.set::<1>(true);
    println!("Score for true: {}", number.visit(&mut Score)?);

    number.set::<1>(false);
    println!("Score for false: {}", number.visit(&mut Score)?);

    // The integer written first is still kept around
    match number.retained::<0>() {
        Some(value) => println!("Retained integer: {}", value),
        None => println!("No integer retained"),
    }

    // Asking for an alternative that is not active
    match number.with::<0, _, _>(|n| *n) {
        Ok(value) => println!("Integer: {}", value),
        Err(VariantError::InactiveAlternative { requested, active }) => {
            println!("Alternative {} requested, {} is active", requested, active)
        }
        Err(e) => println!("Unexpected error: {}", e),
    }

    // Dispatch over an empty container fails instead of guessing
    let empty = OneOf::<(i64, bool)>::new();
    match empty.visit(&mut Score) {
        Ok(score) => println!("This shouldn't happen: {}", score),
        Err(e) => println!("Empty container: {}", e),
    }

    // Optional values dispatch to Some or None
    let mut maybe: Optional<i64> = Optional::new();
    println!("Optional score: {:?}", maybe.visit(&mut Score));
    maybe.set(50);
    println!("Optional score: {:?}", maybe.visit(&mut Score));

    Ok(())
}
