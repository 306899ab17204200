//! Tabular input and column selection.
//!
//! The mapper only needs named-column random access and a row count, captured
//! by the [`Table`] trait. [`DataFrame`] is a small in-memory implementation
//! holding one [`Column`] per name: numeric columns use `NaN` for missing
//! values, text columns hold strings as loaded.
//!
//! Selection distinguishes a single name from a list of names:
//!
//! ```ignore
//! let v = select(&df, &ColumnRef::from("age"))?;    // 1-D, len = rows
//! let m = select(&df, &ColumnRef::from(["age"]))?;  // 2-D, (rows, 1)
//! ```

use crate::array::FeatureArray;
use crate::error::{MapperError, Result};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Reference to the columns feeding one feature.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnRef {
    /// One column, selected as a 1-D array.
    Single(String),
    /// Ordered list of columns, selected as a 2-D array (even with one element).
    List(Vec<String>),
}

impl ColumnRef {
    /// Column names in selection order.
    pub fn names(&self) -> Vec<&str> {
        match self {
            ColumnRef::Single(name) => vec![name.as_str()],
            ColumnRef::List(names) => names.iter().map(String::as_str).collect(),
        }
    }

    /// Label used in logs and output names: the single name, or list names joined by `_`.
    pub fn label(&self) -> String {
        match self {
            ColumnRef::Single(name) => name.clone(),
            ColumnRef::List(names) => names.join("_"),
        }
    }
}

impl From<&str> for ColumnRef {
    fn from(name: &str) -> Self {
        ColumnRef::Single(name.to_string())
    }
}

impl From<String> for ColumnRef {
    fn from(name: String) -> Self {
        ColumnRef::Single(name)
    }
}

impl From<Vec<&str>> for ColumnRef {
    fn from(names: Vec<&str>) -> Self {
        ColumnRef::List(names.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for ColumnRef {
    fn from(names: Vec<String>) -> Self {
        ColumnRef::List(names)
    }
}

impl<const N: usize> From<[&str; N]> for ColumnRef {
    fn from(names: [&str; N]) -> Self {
        ColumnRef::List(names.iter().map(|s| s.to_string()).collect())
    }
}

/// Values of one column, owned.
#[derive(Clone, Debug, PartialEq)]
pub enum Column {
    Numeric(Array1<f64>),
    Text(Array1<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Text(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn view(&self) -> ColumnView<'_> {
        match self {
            Column::Numeric(v) => ColumnView::Numeric(v.view()),
            Column::Text(t) => ColumnView::Text(t.view()),
        }
    }

    /// The given rows, in the given order.
    fn take(&self, rows: &[usize]) -> Column {
        match self {
            Column::Numeric(v) => Column::Numeric(v.select(Axis(0), rows)),
            Column::Text(t) => Column::Text(t.select(Axis(0), rows)),
        }
    }
}

impl From<Array1<f64>> for Column {
    fn from(v: Array1<f64>) -> Self {
        Column::Numeric(v)
    }
}

impl From<Vec<f64>> for Column {
    fn from(v: Vec<f64>) -> Self {
        Column::Numeric(Array1::from(v))
    }
}

impl From<Array1<String>> for Column {
    fn from(t: Array1<String>) -> Self {
        Column::Text(t)
    }
}

impl From<Vec<String>> for Column {
    fn from(t: Vec<String>) -> Self {
        Column::Text(Array1::from(t))
    }
}

impl From<Vec<&str>> for Column {
    fn from(t: Vec<&str>) -> Self {
        Column::Text(t.into_iter().map(str::to_string).collect())
    }
}

/// Values of one column, borrowed from a table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColumnView<'a> {
    Numeric(ArrayView1<'a, f64>),
    Text(ArrayView1<'a, String>),
}

impl<'a> ColumnView<'a> {
    pub fn len(&self) -> usize {
        match self {
            ColumnView::Numeric(v) => v.len(),
            ColumnView::Text(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_numeric(&self) -> Option<ArrayView1<'a, f64>> {
        match self {
            ColumnView::Numeric(v) => Some(*v),
            ColumnView::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<ArrayView1<'a, String>> {
        match self {
            ColumnView::Text(t) => Some(*t),
            ColumnView::Numeric(_) => None,
        }
    }
}

/// Named-column table consumed by the mapper.
pub trait Table {
    /// Number of rows.
    fn n_rows(&self) -> usize;

    /// Column names in table order.
    fn column_names(&self) -> Vec<String>;

    /// Values of one column, or `None` if the name is unknown.
    fn column(&self, name: &str) -> Option<ColumnView<'_>>;

    /// New table holding only the given rows, in the given order.
    fn take_rows(&self, rows: &[usize]) -> Self
    where
        Self: Sized;
}

/// Select the data for a column reference.
///
/// A single name yields a vector of length `n_rows`; a list yields an
/// `(n_rows, len)` matrix with columns in list order. Text columns yield the
/// text counterparts. Unknown names fail with [`MapperError::ColumnNotFound`]
/// naming the first missing column; a list mixing numeric and text columns
/// fails with `InvalidParameter`.
pub fn select<T: Table + ?Sized>(table: &T, reference: &ColumnRef) -> Result<FeatureArray> {
    match reference {
        ColumnRef::Single(name) => match lookup(table, name)? {
            ColumnView::Numeric(v) => Ok(FeatureArray::Vector(v.to_owned())),
            ColumnView::Text(t) => Ok(FeatureArray::Text(t.to_owned())),
        },
        ColumnRef::List(names) => {
            let columns = names
                .iter()
                .map(|name| lookup(table, name))
                .collect::<Result<Vec<_>>>()?;
            let rows = table.n_rows();

            if let Some(numeric) = columns.iter().map(ColumnView::as_numeric).collect::<Option<Vec<_>>>() {
                let mut out = Array2::zeros((rows, numeric.len()));
                for (j, column) in numeric.iter().enumerate() {
                    out.column_mut(j).assign(column);
                }
                return Ok(FeatureArray::Matrix(out));
            }
            if let Some(text) = columns.iter().map(ColumnView::as_text).collect::<Option<Vec<_>>>() {
                let mut out = Array2::from_elem((rows, text.len()), String::new());
                for (j, column) in text.iter().enumerate() {
                    out.column_mut(j).assign(column);
                }
                return Ok(FeatureArray::TextMatrix(out));
            }
            Err(MapperError::InvalidParameter(format!(
                "Columns [{}] mix numeric and text values",
                names.join(", ")
            )))
        }
    }
}

fn lookup<'a, T: Table + ?Sized>(table: &'a T, name: &str) -> Result<ColumnView<'a>> {
    table
        .column(name)
        .ok_or_else(|| MapperError::ColumnNotFound(name.to_string()))
}

/// Cells read as missing numbers.
fn is_missing_token(cell: &str) -> bool {
    matches!(cell, "" | "NA" | "NaN" | "nan")
}

/// Numeric column if every cell is a number or a missing token, else text.
fn infer_column(cells: Vec<String>) -> Column {
    let numbers: Option<Vec<f64>> = cells
        .iter()
        .map(|cell| {
            if is_missing_token(cell) {
                Some(f64::NAN)
            } else {
                cell.parse::<f64>().ok()
            }
        })
        .collect();
    match numbers {
        Some(values) => Column::from(values),
        None => Column::from(cells),
    }
}

/// In-memory table of named columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataFrame {
    names: Vec<String>,
    columns: Vec<Column>,
    index: HashMap<String, usize>,
}

impl DataFrame {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, values)` pairs.
    pub fn from_columns<I, S, V>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<Column>,
    {
        columns
            .into_iter()
            .try_fold(Self::new(), |df, (name, values)| df.with_column(name, values))
    }

    /// Append a column.
    ///
    /// # Errors
    /// - `InvalidParameter` if the name is already taken
    /// - `InvalidShape` if the length differs from the existing row count
    pub fn with_column(mut self, name: impl Into<String>, values: impl Into<Column>) -> Result<Self> {
        let name = name.into();
        let values = values.into();
        if self.index.contains_key(&name) {
            return Err(MapperError::InvalidParameter(format!(
                "Duplicate column name '{}'",
                name
            )));
        }
        if !self.columns.is_empty() && values.len() != self.n_rows() {
            return Err(MapperError::InvalidShape {
                expected: format!("{} rows", self.n_rows()),
                got: format!("{} rows in column '{}'", values.len(), name),
            });
        }
        self.index.insert(name.clone(), self.columns.len());
        self.names.push(name);
        self.columns.push(values);
        Ok(self)
    }

    /// Table without the named column. Unknown names fail with `ColumnNotFound`.
    pub fn drop_column(&self, name: &str) -> Result<Self> {
        if !self.index.contains_key(name) {
            return Err(MapperError::ColumnNotFound(name.to_string()));
        }
        Self::from_columns(
            self.names
                .iter()
                .zip(&self.columns)
                .filter(|(n, _)| n.as_str() != name)
                .map(|(n, c)| (n.clone(), c.clone())),
        )
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Numeric values of a column; `None` for unknown or text columns.
    pub fn numeric(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.column(name).and_then(|c| c.as_numeric())
    }

    /// Text values of a column; `None` for unknown or numeric columns.
    pub fn text(&self, name: &str) -> Option<ArrayView1<'_, String>> {
        self.column(name).and_then(|c| c.as_text())
    }

    /// Load a table from CSV. The header row provides column names.
    ///
    /// A column whose cells all parse as numbers is numeric, with empty
    /// cells, `NA` and `NaN` read as missing values. Any other column is kept
    /// as text.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

        for record in rdr.records() {
            let record = record?;
            for (j, cell) in record.iter().enumerate() {
                cells[j].push(cell.to_string());
            }
        }

        Self::from_columns(headers.into_iter().zip(cells.into_iter().map(infer_column)))
    }

    /// Load a table from a CSV file.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(std::io::BufReader::new(file))
    }
}

impl Table for DataFrame {
    fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    fn column_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn column(&self, name: &str) -> Option<ColumnView<'_>> {
        self.index.get(name).map(|&i| self.columns[i].view())
    }

    fn take_rows(&self, rows: &[usize]) -> Self {
        Self {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.take(rows)).collect(),
            index: self.index.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use proptest::prelude::*;

    fn simple_dataframe() -> DataFrame {
        DataFrame::from_columns([("a", vec![1.0, 2.0, 3.0])]).unwrap()
    }

    fn cars_dataframe() -> DataFrame {
        DataFrame::from_columns([("mpg", vec![30.0, 18.0])])
            .unwrap()
            .with_column("model", vec!["civic", "mustang"])
            .unwrap()
            .with_column("description", vec!["small quiet car", "loud fast car"])
            .unwrap()
    }

    #[test]
    fn test_nonexistent_columns_explicit_fail() {
        let df = simple_dataframe();
        let result = select(&df, &ColumnRef::from(["nonexistent_feature"]));
        match result {
            Err(MapperError::ColumnNotFound(name)) => assert_eq!(name, "nonexistent_feature"),
            other => panic!("expected ColumnNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_select_names_first_missing_column() {
        let df = simple_dataframe();
        let result = select(&df, &ColumnRef::from(["a", "x", "y"]));
        assert!(matches!(result, Err(MapperError::ColumnNotFound(name)) if name == "x"));
    }

    #[test]
    fn test_get_col_subset_single_column_array() {
        let df = simple_dataframe();
        let array = select(&df, &ColumnRef::from("a")).unwrap();
        assert_eq!(array, FeatureArray::Vector(array![1.0, 2.0, 3.0]));
        assert_eq!(array.shape(), vec![3]);
    }

    #[test]
    fn test_get_col_subset_single_column_list() {
        let df = simple_dataframe();
        let array = select(&df, &ColumnRef::from(["a"])).unwrap();
        assert_eq!(array.shape(), vec![3, 1]);
    }

    #[test]
    fn test_select_list_keeps_order_and_duplicates() {
        let df = DataFrame::from_columns([("a", vec![1.0, 2.0]), ("b", vec![3.0, 4.0])]).unwrap();
        let array = select(&df, &ColumnRef::from(["b", "a", "b"])).unwrap();
        assert_eq!(
            array,
            FeatureArray::Matrix(array![[3.0, 1.0, 3.0], [4.0, 2.0, 4.0]])
        );
    }

    #[test]
    fn test_select_text_column() {
        let df = cars_dataframe();
        let single = select(&df, &ColumnRef::from("model")).unwrap();
        assert_eq!(single.shape(), vec![2]);
        assert!(single.is_text());

        let list = select(&df, &ColumnRef::from(["description", "model"])).unwrap();
        assert_eq!(list.shape(), vec![2, 2]);
        assert_eq!(list.to_text().unwrap()[[1, 1]], "mustang");
    }

    #[test]
    fn test_select_mixed_list_fails() {
        let df = cars_dataframe();
        let result = select(&df, &ColumnRef::from(["mpg", "model"]));
        assert!(matches!(result, Err(MapperError::InvalidParameter(_))));
    }

    #[test]
    fn test_with_column_length_mismatch() {
        let result = simple_dataframe().with_column("b", vec![1.0]);
        assert!(matches!(result, Err(MapperError::InvalidShape { .. })));
    }

    #[test]
    fn test_with_column_duplicate_name() {
        let result = simple_dataframe().with_column("a", vec![1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(MapperError::InvalidParameter(_))));
    }

    #[test]
    fn test_drop_column() {
        let df = cars_dataframe();
        let dropped = df.drop_column("model").unwrap();
        assert_eq!(dropped.column_names(), vec!["mpg".to_string(), "description".to_string()]);
        assert!(df.drop_column("zzz").is_err());
    }

    #[test]
    fn test_take_rows() {
        let df = DataFrame::from_columns([("a", vec![1.0, 2.0, 3.0, 4.0])])
            .unwrap()
            .with_column("b", vec!["w", "x", "y", "z"])
            .unwrap();
        let sub = df.take_rows(&[3, 0]);
        assert_eq!(sub.n_rows(), 2);
        assert_eq!(sub.numeric("a").unwrap().to_vec(), vec![4.0, 1.0]);
        assert_eq!(sub.text("b").unwrap().to_vec(), vec!["z", "w"]);
    }

    #[test]
    fn test_from_csv_reader_parses_missing() {
        let csv = "a,b\n1,2\n,3.5\nNA,4\n";
        let df = DataFrame::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(df.n_rows(), 3);
        let a = df.numeric("a").unwrap();
        assert_eq!(a[0], 1.0);
        assert!(a[1].is_nan());
        assert!(a[2].is_nan());
        assert_eq!(df.numeric("b").unwrap().to_vec(), vec![2.0, 3.5, 4.0]);
    }

    #[test]
    fn test_from_csv_reader_keeps_text_columns() {
        let csv = "model,description,mpg\ncivic,small quiet car,30\nmustang,,18\n";
        let df = DataFrame::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(df.text("model").unwrap().to_vec(), vec!["civic", "mustang"]);
        assert_eq!(df.text("description").unwrap()[1], "");
        assert_eq!(df.numeric("mpg").unwrap().to_vec(), vec![30.0, 18.0]);
        assert!(df.numeric("model").is_none());
    }

    proptest! {
        #[test]
        fn prop_single_name_selects_vector(values in proptest::collection::vec(-1e3f64..1e3, 1..30)) {
            let n = values.len();
            let df = DataFrame::from_columns([("x", values)]).unwrap();
            let out = select(&df, &ColumnRef::from("x")).unwrap();
            prop_assert_eq!(out.shape(), vec![n]);
        }

        #[test]
        fn prop_list_selects_matrix(n in 1usize..30, width in 1usize..5) {
            let df = DataFrame::from_columns([("x", vec![0.5; n])]).unwrap();
            let names = ColumnRef::List(vec!["x".to_string(); width]);
            let out = select(&df, &names).unwrap();
            prop_assert_eq!(out.shape(), vec![n, width]);
        }
    }
}
