//! tidyframe: tidy verbs, column selectors and scoped group-by sessions on
//! top of a small in-memory DataFrame engine.
//!
//! ```
//! use tidyframe::selectors::contains;
//! use tidyframe::{tribble, verbs};
//!
//! let df = tribble![
//!     ~name, ~age, ~height;
//!     "Ann", 31, 1.62;
//!     "Bob", 45, 1.80;
//! ]
//! .unwrap();
//!
//! let picked = verbs::select(&df, &[contains("a").negate().into()]).unwrap();
//! assert_eq!(picked.column_names(), vec!["height"]);
//! ```

pub mod column;
pub mod config;
pub mod dataframe;
pub mod error;
pub mod groupby;
pub mod io;
pub mod pivot;
pub mod selectors;
pub mod session;
pub mod stat;
pub mod tribble;
pub mod value;
pub mod verbs;

// Re-export commonly used types
pub use column::{Column, ColumnType};
pub use config::TidyConfig;
pub use dataframe::DataFrame;
pub use error::{Error, Result};
pub use groupby::{AggFunc, GroupedSeries};
pub use selectors::{ColumnSpec, Selector};
pub use session::{ActiveGroupBy, GroupBy};
pub use stat::{AggOptions, Stat};
pub use value::Value;
pub use verbs::TidyExt;

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
