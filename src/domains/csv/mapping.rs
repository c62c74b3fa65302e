use chrono::{DateTime, Utc};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domains::csv::config::CsvSettings;

type Accessor<T> = Box<dyn Fn(&T, &CsvSettings) -> String + Send + Sync>;

struct CsvColumn<T> {
    header: String,
    accessor: Accessor<T>,
}

/// Ordered column-to-field binding used to serialize one entity type to CSV.
/// Plays the role a class map plays in reflection-based serializers: nothing
/// is exported for a type until a mapping is registered for it.
pub struct CsvMapping<T> {
    columns: Vec<CsvColumn<T>>,
}

impl<T> CsvMapping<T> {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Bind a column to a string-producing accessor.
    pub fn column<F>(mut self, header: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.columns.push(CsvColumn {
            header: header.into(),
            accessor: Box::new(move |item, _| accessor(item)),
        });
        self
    }

    /// Bind a column to a timestamp field; rendered with the active
    /// configuration's date-time format.
    pub fn date_column<F>(mut self, header: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.columns.push(CsvColumn {
            header: header.into(),
            accessor: Box::new(move |item, settings| {
                accessor(item)
                    .format(&settings.date_time_format)
                    .to_string()
            }),
        });
        self
    }

    /// Same as [`date_column`](Self::date_column) for optional timestamps;
    /// `None` renders as an empty field.
    pub fn optional_date_column<F>(mut self, header: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> Option<DateTime<Utc>> + Send + Sync + 'static,
    {
        self.columns.push(CsvColumn {
            header: header.into(),
            accessor: Box::new(move |item, settings| match accessor(item) {
                Some(value) => value.format(&settings.date_time_format).to_string(),
                None => String::new(),
            }),
        });
        self
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.header.as_str()).collect()
    }

    /// Render one entity as a CSV record per the active settings.
    pub fn record(&self, item: &T, settings: &CsvSettings) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| {
                let value = (c.accessor)(item, settings);
                if settings.trim_inside_quotes {
                    value.trim().to_string()
                } else {
                    value
                }
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<T> Default for CsvMapping<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide registry of CSV mappings keyed by entity type. Registration
/// is an atomic upsert (last write wins); resolution soft-fails with `None`
/// so callers can report the missing mapping instead of panicking.
pub struct CsvMappingRegistry {
    registry: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl CsvMappingRegistry {
    pub fn new() -> Self {
        Self {
            registry: RwLock::new(HashMap::new()),
        }
    }

    pub fn register<T: 'static>(&self, mapping: CsvMapping<T>) {
        let mut registry = self
            .registry
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        registry.insert(TypeId::of::<T>(), Arc::new(mapping));
    }

    pub fn resolve<T: 'static>(&self) -> Option<Arc<CsvMapping<T>>> {
        let registry = self
            .registry
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        registry
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|mapping| mapping.downcast::<CsvMapping<T>>().ok())
    }
}

impl Default for CsvMappingRegistry {
    fn default() -> Self {
        Self::new()
    }
}
