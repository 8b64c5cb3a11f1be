/// Builds a [`BlockSequence`] the way `vec!` builds a `Vec`.
///
/// The resulting capacity equals the number of elements, except for the empty
/// form which uses the default capacity.
///
/// # Examples
///
/// ```rust
/// use saturn_sequence::block_seq;
///
/// let listed = block_seq![1, 2, 3];
/// assert_eq!(listed.to_vec(), vec![1, 2, 3]);
///
/// let repeated = block_seq!['x'; 4];
/// assert_eq!(repeated.len(), 4);
/// assert_eq!(repeated.capacity(), 4);
/// ```
///
/// [`BlockSequence`]: crate::generic::block_sequence::BlockSequence
#[macro_export]
macro_rules! block_seq {
    () => {
        $crate::generic::block_sequence::BlockSequence::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::generic::block_sequence::BlockSequence::from_collection(
            ::std::iter::repeat($elem).take($n),
        )
    };
    ($($x:expr),+ $(,)?) => {
        $crate::generic::block_sequence::BlockSequence::from(::std::vec![$($x),+])
    };
}
