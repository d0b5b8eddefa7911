/// Builds a [`Table`](crate::Table) from `name => values` pairs.
///
/// Each value expression is converted with `Column::from`, so any vector
/// with a `From` conversion works (`Vec<i32>`, `Vec<Option<f64>>`,
/// `Vec<&str>`, ...), as does a [`Column`](crate::Column) itself.
///
/// ```rust
/// use delimwrite::{table, Column};
///
/// let data = table! {
///     "id" => vec![1, 2],
///     "score" => vec![Some(0.5), None],
///     "raw" => Column::Raw(vec![0, 1]),
/// };
/// assert_eq!(data.len(), 3);
/// ```
#[macro_export]
macro_rules! table {
    () => {
        $crate::Table::new()
    };

    ($($name:expr => $values:expr),+ $(,)?) => {{
        let mut table = $crate::Table::new();
        $(
            table.insert($name, $crate::Column::from($values));
        )+
        table
    }};
}
