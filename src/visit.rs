/// Declares the result type shared by every handler of a visitor
///
/// A visitor implements `Visitor` once and [`Handle<T>`] once per alternative
/// type it can receive. Dispatch picks the handler for whichever alternative
/// is active.
///
/// # Examples
///
/// ```
/// use sovran_variant::{Handle, OneOf, Visitor};
///
/// struct Describe;
///
/// impl Visitor for Describe {
///     type Result = String;
/// }
///
/// impl Handle<u8> for Describe {
///     fn handle(&mut self, value: &u8) -> String {
///         format!("byte {}", value)
///     }
/// }
///
/// impl Handle<String> for Describe {
///     fn handle(&mut self, value: &String) -> String {
///         format!("text {:?}", value)
///     }
/// }
///
/// let mut value = OneOf::<(u8, String)>::of::<0>(7);
/// assert_eq!(value.visit(&mut Describe).unwrap(), "byte 7");
///
/// value.set::<1>("seven".to_string());
/// assert_eq!(value.visit(&mut Describe).unwrap(), "text \"seven\"");
/// ```
pub trait Visitor {
    /// The value every handler returns
    type Result;
}

/// Handles one alternative type for a [`Visitor`]
pub trait Handle<T>: Visitor {
    fn handle(&mut self, value: &T) -> Self::Result;
}

/// Routes a record index of an alternative list to the matching [`Handle`] impl
///
/// Implemented for every tuple of up to eight alternatives, for any visitor
/// that handles each of the tuple's types. Callers use
/// [`OneOf::visit`](crate::OneOf::visit) rather than this trait directly.
pub trait Dispatch<V: Visitor>: crate::Alternatives {
    /// Invokes the handler for record `index`
    ///
    /// Returns `None` if `index` is out of range or that record holds no value.
    fn dispatch(records: &Self::Records, index: usize, visitor: &mut V) -> Option<V::Result>;
}
