//! Query Builder: translates raw query-string parameters into a data-fetch
//! specification.
//!
//! The builder consumes a [`RawParams`] map and an initial [`TourQuery`]
//! handle and refines the handle through a fixed pipeline: filter → sort →
//! field projection → pagination. It never executes the query itself; the
//! resulting [`TourQuery`] is a lazy specification executed later by the
//! repository layer.
//!
//! ```
//! use tours_backend::query::{QueryBuilder, RawParams, TourQuery};
//!
//! let params = RawParams::from_pairs([
//!     ("difficulty".to_string(), "easy".to_string()),
//!     ("price[lte]".to_string(), "1000".to_string()),
//!     ("sort".to_string(), "-price".to_string()),
//!     ("limit".to_string(), "3".to_string()),
//! ]);
//!
//! let query = QueryBuilder::new(TourQuery::default(), params)
//!     .filter()
//!     .sort()
//!     .limit_fields()
//!     .paginate()
//!     .into_query();
//! assert_eq!(query.limit, 3);
//! ```

pub mod builder;
pub mod params;
pub mod spec;

pub use builder::{parse_positive_or, QueryBuilder, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use params::{ParamValue, RawParams};
pub use spec::{
    FilterOp, Predicate, Projection, SortDirection, SortKey, TourQuery, DEFAULT_SORT_FIELD,
    RESERVED_PARAMS,
};
