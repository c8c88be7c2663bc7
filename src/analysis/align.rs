use crate::data::model::{numeric_value, Row};

/// One position-matched pair of channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedPair {
    pub index: usize,
    pub signal_a: f64,
    pub signal_b: f64,
}

/// Pair `rows_a` and `rows_b` by position, reading `column_a` from the first
/// and `column_b` from the second.
///
/// Yields `min(rows_a.len(), rows_b.len())` pairs; trailing rows of the longer
/// input are ignored. Missing or non-numeric cells read as `0.0`.
pub fn align<'a>(
    rows_a: &'a [Row],
    column_a: &'a str,
    rows_b: &'a [Row],
    column_b: &'a str,
) -> impl Iterator<Item = AlignedPair> + 'a {
    rows_a
        .iter()
        .zip(rows_b)
        .enumerate()
        .map(move |(index, (a, b))| AlignedPair {
            index,
            signal_a: numeric_value(a, column_a),
            signal_b: numeric_value(b, column_b),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn rows(column: &str, values: &[&str]) -> Vec<Row> {
        values
            .iter()
            .map(|v| Row::from([(column.to_string(), CellValue::from(*v))]))
            .collect()
    }

    #[test]
    fn truncates_to_shorter_input() {
        let a = rows("ch", &["1", "2", "3"]);
        let b = rows("ch", &["4", "5"]);
        let pairs: Vec<_> = align(&a, "ch", &b, "ch").collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(
            pairs[1],
            AlignedPair {
                index: 1,
                signal_a: 2.0,
                signal_b: 5.0
            }
        );
    }

    #[test]
    fn empty_input_yields_nothing() {
        let a = rows("ch", &["1"]);
        assert_eq!(align(&a, "ch", &[], "ch").count(), 0);
        assert_eq!(align(&[], "ch", &a, "ch").count(), 0);
    }

    #[test]
    fn reads_different_columns_per_input() {
        let a = rows("Fp1", &["1.25"]);
        let b = rows("O2", &["-0.5"]);
        let pair = align(&a, "Fp1", &b, "O2").next().unwrap();
        assert_eq!((pair.signal_a, pair.signal_b), (1.25, -0.5));
    }

    #[test]
    fn bad_cells_read_as_zero() {
        let a = rows("ch", &["n/a", "Infinity"]);
        let b = rows("other", &["1", "2"]);
        for pair in align(&a, "ch", &b, "ch") {
            assert_eq!(pair.signal_a, 0.0);
            assert_eq!(pair.signal_b, 0.0);
        }
    }
}
