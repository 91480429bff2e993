/// Builds a restore mapping table.
///
/// ```
/// use stash_filter::{mapping, EntityKind, MappingTable};
///
/// let table = mapping! {
///     EntityKind::Drop => { 5 => 42, 6 => 43 },
///     EntityKind::Trade => { 9 => 90 },
/// };
/// assert_eq!(table.get_mapping(EntityKind::Drop, 5), Some(42));
/// ```
#[macro_export]
macro_rules! mapping {
    () => {
        {
            let map: std::collections::HashMap<($crate::EntityKind, u64), u64> =
                std::collections::HashMap::new();
            map
        }
    };

    ( $( $kind:expr => { $( $old:expr => $new:expr ),* $(,)? } ),+ $(,)? ) => {
        {
            let mut map: std::collections::HashMap<($crate::EntityKind, u64), u64> =
                std::collections::HashMap::new();
            $(
                $(
                    map.insert(($kind, $old), $new);
                )*
            )+
            map
        }
    };
}
