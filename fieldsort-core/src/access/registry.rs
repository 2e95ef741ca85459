//! Per-type field registries
//!
//! A registry maps field names to typed getters for one record type. It is
//! assembled once (usually in a `static`) and replaces run-time reflection:
//! resolution walks the type's own fields first, then the fields of every
//! embedded ancestor in the order they were declared with
//! [`FieldRegistryBuilder::extends`].

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use super::value::{FieldType, FieldValue, KeyValue};
use crate::error::{Result, SortError};

/// Shared getter reading one field from a record.
pub type Getter<R> = Arc<dyn for<'a> Fn(&'a R) -> FieldValue<'a> + Send + Sync>;

fn getter<R, F>(read: F) -> Getter<R>
where
    F: for<'a> Fn(&'a R) -> FieldValue<'a> + Send + Sync + 'static,
{
    Arc::new(read)
}

/// Record types that expose a field registry.
///
/// ```ignore
/// static USERS: Lazy<FieldRegistry<User>> = Lazy::new(|| {
///     FieldRegistry::builder("User")
///         .field("id", |u: &User| &u.id)
///         .field("name", |u: &User| &u.name)
///         .build()
///         .expect("user fields")
/// });
///
/// impl Record for User {
///     fn registry() -> &'static FieldRegistry<Self> {
///         &USERS
///     }
/// }
/// ```
pub trait Record: Sized + 'static {
    /// Fields of this type, built once.
    fn registry() -> &'static FieldRegistry<Self>;
}

/// A resolved field: name, declared type and getter.
pub struct FieldDescriptor<R> {
    name: String,
    field_type: FieldType,
    nullable: bool,
    declared_on: &'static str,
    getter: Getter<R>,
}

impl<R> FieldDescriptor<R> {
    /// Field name as registered.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type.
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Whether the field may read as [`FieldValue::Null`]
    pub fn nullable(&self) -> bool {
        self.nullable
    }

    /// Type that declares the field (the record type itself or an ancestor)
    pub fn declared_on(&self) -> &'static str {
        self.declared_on
    }

    /// Read the field from `record`.
    #[inline]
    pub fn read<'a>(&self, record: &'a R) -> FieldValue<'a> {
        (*self.getter)(record)
    }
}

impl<R> Clone for FieldDescriptor<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            field_type: self.field_type,
            nullable: self.nullable,
            declared_on: self.declared_on,
            getter: Arc::clone(&self.getter),
        }
    }
}

impl<R> fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("nullable", &self.nullable)
            .field("declared_on", &self.declared_on)
            .finish()
    }
}

struct Layer<R> {
    type_name: &'static str,
    fields: Vec<FieldDescriptor<R>>,
}

/// Field registry for record type `R`
pub struct FieldRegistry<R> {
    type_name: &'static str,
    layers: Vec<Layer<R>>,
}

impl<R> fmt::Debug for FieldRegistry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layers: Vec<_> = self.layers.iter().map(|l| l.type_name).collect();
        f.debug_struct("FieldRegistry")
            .field("type_name", &self.type_name)
            .field("layers", &layers)
            .field("field_count", &self.layers.iter().map(|l| l.fields.len()).sum::<usize>())
            .finish()
    }
}

impl<R: 'static> FieldRegistry<R> {
    /// Start a registry for the type called `type_name`.
    pub fn builder(type_name: &'static str) -> FieldRegistryBuilder<R> {
        FieldRegistryBuilder {
            type_name,
            own: Vec::new(),
            inherited: Vec::new(),
            duplicate: None,
        }
    }

    /// Name the registry was built for.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Find the most-derived field called `name`.
    pub fn resolve(&self, name: &str) -> Result<&FieldDescriptor<R>> {
        for layer in &self.layers {
            if let Some(field) = layer.fields.iter().find(|f| f.name == name) {
                trace!(
                    record = self.type_name,
                    field = name,
                    declared_on = layer.type_name,
                    "resolved field"
                );
                return Ok(field);
            }
        }

        Err(SortError::FieldNotFound {
            type_name: self.type_name,
            field: name.to_string(),
        })
    }

    /// Declared type of the field called `name`.
    pub fn resolve_type(&self, name: &str) -> Result<FieldType> {
        self.resolve(name).map(FieldDescriptor::field_type)
    }

    /// Current value of the field called `name` on `record`.
    pub fn read_value<'a>(&self, record: &'a R, name: &str) -> Result<FieldValue<'a>> {
        Ok(self.resolve(name)?.read(record))
    }

    /// True if `name` resolves on this type or an ancestor.
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }

    /// Every field name in resolution order. Names shadowed by a more-derived
    /// declaration are listed again under their ancestor.
    pub fn field_names(&self) -> Vec<&str> {
        self.layers
            .iter()
            .flat_map(|layer| layer.fields.iter().map(|f| f.name.as_str()))
            .collect()
    }

    fn embedded_in<C: 'static>(
        &self,
        project: for<'a> fn(&'a C) -> &'a R,
    ) -> impl Iterator<Item = Layer<C>> + '_ {
        self.layers.iter().map(move |layer| Layer {
            type_name: layer.type_name,
            fields: layer
                .fields
                .iter()
                .map(|field| {
                    let parent_get = Arc::clone(&field.getter);
                    FieldDescriptor {
                        name: field.name.clone(),
                        field_type: field.field_type,
                        nullable: field.nullable,
                        declared_on: field.declared_on,
                        getter: getter(move |record: &C| (*parent_get)(project(record))),
                    }
                })
                .collect(),
        })
    }
}

/// Builder returned by [`FieldRegistry::builder`].
pub struct FieldRegistryBuilder<R> {
    type_name: &'static str,
    own: Vec<FieldDescriptor<R>>,
    inherited: Vec<Layer<R>>,
    duplicate: Option<String>,
}

impl<R> fmt::Debug for FieldRegistryBuilder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRegistryBuilder")
            .field("type_name", &self.type_name)
            .field("pending_fields", &self.own.len())
            .field("inherited_layers", &self.inherited.len())
            .finish()
    }
}

impl<R: 'static> FieldRegistryBuilder<R> {
    /// Register a stored field through a projection to its value.
    pub fn field<V>(self, name: &str, project: for<'a> fn(&'a R) -> &'a V) -> Self
    where
        V: KeyValue + 'static,
    {
        self.push(
            name,
            V::field_type(),
            V::NULLABLE,
            getter(move |record: &R| project(record).field_value()),
        )
    }

    /// Register a computed or opaque field with an explicit declared type.
    pub fn field_with<F>(self, name: &str, field_type: FieldType, nullable: bool, read: F) -> Self
    where
        F: for<'a> Fn(&'a R) -> FieldValue<'a> + Send + Sync + 'static,
    {
        self.push(name, field_type, nullable, getter(read))
    }

    /// Inherit every field of `parent`, reached through `project`.
    ///
    /// Fields registered on this builder shadow inherited ones with the same
    /// name.
    pub fn extends<P: 'static>(
        mut self,
        parent: &FieldRegistry<P>,
        project: for<'a> fn(&'a R) -> &'a P,
    ) -> Self {
        self.inherited.extend(parent.embedded_in(project));
        self
    }

    /// Finish the registry.
    ///
    /// Fails with [`SortError::DuplicateField`] if a name was registered
    /// twice on this type.
    pub fn build(self) -> Result<FieldRegistry<R>> {
        if let Some(field) = self.duplicate {
            return Err(SortError::DuplicateField {
                type_name: self.type_name,
                field,
            });
        }

        let mut layers = Vec::with_capacity(self.inherited.len() + 1);
        layers.push(Layer {
            type_name: self.type_name,
            fields: self.own,
        });
        layers.extend(self.inherited);

        Ok(FieldRegistry {
            type_name: self.type_name,
            layers,
        })
    }

    fn push(mut self, name: &str, field_type: FieldType, nullable: bool, getter: Getter<R>) -> Self {
        if self.own.iter().any(|f| f.name == name) {
            self.duplicate.get_or_insert_with(|| name.to_string());
            return self;
        }

        self.own.push(FieldDescriptor {
            name: name.to_string(),
            field_type,
            nullable,
            declared_on: self.type_name,
            getter,
        });
        self
    }
}
