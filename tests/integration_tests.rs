use sovran_variant::{Handle, OneOf, Optional, RecencyClock, Stamp, VariantError, Visitor};

// Visitor mapping ints to double and bools to fixed scores
struct Score;

impl Visitor for Score {
    type Result = i32;
}

impl Handle<i32> for Score {
    fn handle(&mut self, value: &i32) -> i32 {
        value * 2
    }
}

impl Handle<bool> for Score {
    fn handle(&mut self, value: &bool) -> i32 {
        if *value {
            32
        } else {
            42
        }
    }
}

// Visitor that names the alternative it received
struct Name;

impl Visitor for Name {
    type Result = String;
}

impl Handle<u8> for Name {
    fn handle(&mut self, value: &u8) -> String {
        format!("u8:{}", value)
    }
}

impl Handle<String> for Name {
    fn handle(&mut self, value: &String) -> String {
        format!("string:{}", value)
    }
}

impl Handle<char> for Name {
    fn handle(&mut self, value: &char) -> String {
        format!("char:{}", value)
    }
}

impl Handle<Vec<u8>> for Name {
    fn handle(&mut self, value: &Vec<u8>) -> String {
        format!("bytes:{}", value.len())
    }
}

// Visitor that remembers how many times it was called
#[derive(Default)]
struct Counter {
    calls: usize,
}

impl Visitor for Counter {
    type Result = usize;
}

impl Handle<i32> for Counter {
    fn handle(&mut self, _: &i32) -> usize {
        self.calls += 1;
        self.calls
    }
}

impl Handle<bool> for Counter {
    fn handle(&mut self, _: &bool) -> usize {
        self.calls += 1;
        self.calls
    }
}

#[test]
fn test_int_bool_dispatch_sequence() -> Result<(), VariantError> {
    let mut value = OneOf::<(i32, bool)>::of::<0>(11);
    assert_eq!(value.visit(&mut Score)?, 22);

    value.set::<1>(true);
    assert_eq!(value.visit(&mut Score)?, 32);

    value.set::<1>(false);
    assert_eq!(value.visit(&mut Score)?, 42);

    Ok(())
}

#[test]
fn test_later_write_wins_and_earlier_storage_is_kept() -> Result<(), VariantError> {
    let mut value = OneOf::<(i32, bool)>::of::<0>(11);
    let int_storage = value.record::<0>().value().map(|v| v as *const i32);

    value.set::<1>(true);
    assert_eq!(value.visit(&mut Score)?, 32);

    // The int record is still allocated, just not visited
    assert_eq!(value.retained::<0>(), Some(&11));
    assert_eq!(
        value.record::<0>().value().map(|v| v as *const i32),
        int_storage
    );
    assert_eq!(value.get::<0>(), None);

    Ok(())
}

#[test]
fn test_switching_back_reuses_old_value_and_storage() -> Result<(), VariantError> {
    let mut value = OneOf::<(i32, bool)>::of::<0>(11);
    let int_storage = value.record::<0>().value().map(|v| v as *const i32);

    value.set::<1>(true);
    value.set::<0>(5);

    // Rewriting the int goes into the same allocation
    assert_eq!(
        value.record::<0>().value().map(|v| v as *const i32),
        int_storage
    );
    assert_eq!(value.visit(&mut Score)?, 10);

    // The bool that was active in between is still retained
    assert_eq!(value.retained::<1>(), Some(&true));

    Ok(())
}

#[test]
fn test_never_written_container_fails_dispatch() {
    let value = OneOf::<(i32, bool)>::new();
    assert_eq!(value.visit(&mut Score), Err(VariantError::NoActiveAlternative));
    assert!(value.is_empty());

    let value: OneOf<(i32, bool)> = Default::default();
    assert_eq!(value.visit(&mut Score), Err(VariantError::NoActiveAlternative));
}

#[test]
fn test_latest_write_wins_regardless_of_position() -> Result<(), VariantError> {
    let mut value = OneOf::<(u8, String, char, Vec<u8>)>::new();

    value.set::<3>(vec![1, 2, 3]);
    assert_eq!(value.visit(&mut Name)?, "bytes:3");

    value.set::<1>("mid".to_string());
    assert_eq!(value.visit(&mut Name)?, "string:mid");

    value.set::<2>('z');
    assert_eq!(value.visit(&mut Name)?, "char:z");

    value.set::<0>(9);
    assert_eq!(value.visit(&mut Name)?, "u8:9");

    value.set::<3>(vec![]);
    assert_eq!(value.visit(&mut Name)?, "bytes:0");
    assert_eq!(value.active(), Some(3));

    // Every earlier alternative is still retained
    assert_eq!(value.retained::<0>(), Some(&9));
    assert_eq!(value.retained::<1>().map(String::as_str), Some("mid"));
    assert_eq!(value.retained::<2>(), Some(&'z'));

    Ok(())
}

#[test]
fn test_stamps_follow_program_order() {
    let mut first = OneOf::<(i32, bool)>::of::<1>(true);
    let mut second = OneOf::<(char,)>::of::<0>('a');
    first.set::<0>(1);
    second.set::<0>('b');

    let a = first.stamp::<1>();
    let b = first.stamp::<0>();
    let c = second.stamp::<0>();
    assert!(a < b);
    assert!(b < c);
    assert!(!a.is_never());
}

#[test]
fn test_clone_preserves_active_and_is_independent() -> Result<(), VariantError> {
    let mut original = OneOf::<(i32, bool)>::of::<0>(11);
    original.set::<1>(false);

    let mut copy = original.clone();
    assert_eq!(copy.active(), Some(1));
    assert_eq!(copy.stamp::<0>(), original.stamp::<0>());
    assert_eq!(copy.stamp::<1>(), original.stamp::<1>());
    assert_eq!(copy.retained::<0>(), Some(&11));

    copy.set::<0>(100);
    assert_eq!(copy.visit(&mut Score)?, 200);
    assert_eq!(original.visit(&mut Score)?, 42);
    assert_eq!(original.retained::<0>(), Some(&11));

    Ok(())
}

#[test]
fn test_clone_of_empty_container_is_empty() {
    let original = OneOf::<(i32, bool)>::new();
    let copy = original.clone();
    assert!(copy.is_empty());
    assert_eq!(copy.retained::<0>(), None);
}

#[test]
fn test_clone_from_copies_stamps() {
    let source = OneOf::<(i32, bool)>::of::<1>(true);
    let mut target = OneOf::<(i32, bool)>::of::<0>(3);

    target.clone_from(&source);
    assert_eq!(target.active(), Some(1));
    assert_eq!(target.stamp::<0>(), Stamp::NEVER);
    assert_eq!(target.retained::<0>(), None);
    assert_eq!(target.get::<1>(), Some(&true));
}

#[test]
fn test_clone_from_reuses_existing_allocations() {
    let mut target = OneOf::<(String, bool)>::of::<0>("old".to_string());
    let before = target.record::<0>().value().map(|v| v as *const String);

    let source = OneOf::<(String, bool)>::of::<0>("new".to_string());
    target.clone_from(&source);

    let after = target.record::<0>().value().map(|v| v as *const String);
    assert_eq!(after, before);
    assert_eq!(target.get::<0>().map(String::as_str), Some("new"));
    assert_eq!(target.stamp::<0>(), source.stamp::<0>());

    // An absent source record clears the target's record
    target.clone_from(&OneOf::new());
    assert!(target.is_empty());
    assert_eq!(target.retained::<0>(), None);
}

#[test]
fn test_take_leaves_source_fresh() -> Result<(), VariantError> {
    let mut source = OneOf::<(i32, bool)>::of::<0>(4);
    let moved = source.take();

    assert_eq!(moved.visit(&mut Score)?, 8);
    assert_eq!(source.visit(&mut Score), Err(VariantError::NoActiveAlternative));
    assert_eq!(source.stamp::<0>(), Stamp::NEVER);

    Ok(())
}

#[test]
fn test_visitor_state_is_threaded_through() -> Result<(), VariantError> {
    let mut counter = Counter::default();
    let mut value = OneOf::<(i32, bool)>::of::<0>(1);

    value.visit(&mut counter)?;
    value.set::<1>(true);
    value.visit(&mut counter)?;
    assert_eq!(value.visit(&mut counter)?, 3);

    Ok(())
}

#[test]
fn test_isolated_clock_domain() {
    static DOMAIN: RecencyClock = RecencyClock::new();

    let mut value = OneOf::<(i32, bool)>::new();
    value.set_with::<1, _>(&DOMAIN, true);
    value.set_with::<0, _>(&DOMAIN, 2);

    assert_eq!(value.active(), Some(0));
    assert_eq!(DOMAIN.last(), value.stamp::<0>());
}

#[test]
fn test_optional_dispatch_is_total() {
    let mut value: Optional<i32> = Optional::new();
    assert_eq!(value.visit(&mut Score), None);

    value.set(21);
    assert_eq!(value.visit(&mut Score), Some(42));

    value.reset();
    assert_eq!(value.visit(&mut Score), None);
}

#[test]
fn test_error_display() {
    assert_eq!(
        VariantError::LockError.to_string(),
        "Failed to acquire lock"
    );
    assert_eq!(
        VariantError::NoActiveAlternative.to_string(),
        "No alternative has been written to the container"
    );
    assert_eq!(
        VariantError::InactiveAlternative {
            requested: 0,
            active: 2
        }
        .to_string(),
        "Alternative 0 is not active (active alternative is 2)"
    );

    assert!(format!("{:?}", VariantError::LockError).contains("LockError"));
}
