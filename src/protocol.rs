use serde::{Deserialize, Serialize};

/// A protocol whose history feeds the dataset.
///
/// `name` and `category` are copied verbatim into the output rows; `id` is
/// the opaque key handed to the series fetcher. Immutable for the duration
/// of a build.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Protocol {
    pub id: String,
    pub name: String,
    pub category: String,
}

impl Protocol {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
        }
    }
}
