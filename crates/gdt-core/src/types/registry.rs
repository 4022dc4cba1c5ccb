use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use super::builtin;
use super::error::{ParseError, TypeError};
use super::value::Value;
use crate::field::{FieldDesc, FieldType};

/// Parses charset-decoded field content according to its descriptor.
pub type ParseFn = Arc<dyn Fn(&str, &FieldDesc) -> Result<Value, ParseError> + Send + Sync>;

static GLOBAL: LazyLock<Arc<TypeRegistry>> =
    LazyLock::new(|| Arc::new(TypeRegistry::with_builtin_types()));

/// Maps type tags to parse functions.
///
/// Registration is append-only. Lookups take a shared lock and release it
/// before the parse function runs, so parsing never blocks registration.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use gdt_core::{FieldDesc, FieldId, FieldType, ParseError, TypeRegistry, Value};
///
/// let registry = TypeRegistry::with_builtin_types();
/// registry.register(
///     FieldType::new("upper"),
///     Arc::new(|value: &str, _: &FieldDesc| -> Result<Value, ParseError> {
///         Ok(Value::Text(value.to_uppercase()))
///     }),
/// )?;
///
/// let desc = FieldDesc::new(FieldId(3101), FieldType::new("upper"));
/// assert_eq!(registry.parse("doe", &desc)?, Value::Text("DOE".into()));
/// # Ok::<(), gdt_core::TypeError>(())
/// ```
#[derive(Default)]
pub struct TypeRegistry {
    types: RwLock<HashMap<FieldType, ParseFn>>,
}

impl TypeRegistry {
    /// An empty registry without any types.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh registry holding `alnum`, `num`, `float`, `date` and `time`.
    pub fn with_builtin_types() -> Self {
        let mut types: HashMap<FieldType, ParseFn> = HashMap::new();
        types.insert(FieldType::TEXT, Arc::new(builtin::parse_text));
        types.insert(FieldType::NUMBER, Arc::new(builtin::parse_number));
        types.insert(FieldType::FLOAT, Arc::new(builtin::parse_float));
        types.insert(FieldType::DATE, Arc::new(builtin::parse_date));
        types.insert(FieldType::TIME, Arc::new(builtin::parse_time));
        Self {
            types: RwLock::new(types),
        }
    }

    /// The process-wide registry, initialised once with the built-in types.
    pub fn global() -> Arc<TypeRegistry> {
        Arc::clone(&GLOBAL)
    }

    /// Add a parse function for `field_type`.
    ///
    /// # Errors
    /// [`TypeError::DuplicateType`] when the tag is already registered; the
    /// existing function stays in place.
    pub fn register(&self, field_type: FieldType, parse: ParseFn) -> Result<(), TypeError> {
        let mut types = self.types.write().unwrap_or_else(PoisonError::into_inner);
        if types.contains_key(&field_type) {
            return Err(TypeError::DuplicateType(field_type));
        }
        tracing::debug!(field_type = %field_type, "registered field type");
        types.insert(field_type, parse);
        Ok(())
    }

    pub fn contains(&self, field_type: &FieldType) -> bool {
        self.types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(field_type)
    }

    /// Parse `value` with the function registered for `desc.field_type`.
    ///
    /// # Errors
    /// [`TypeError::UnknownType`] for unregistered tags; otherwise whatever
    /// the parse function returns.
    pub fn parse(&self, value: &str, desc: &FieldDesc) -> Result<Value, TypeError> {
        let parse = self
            .types
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&desc.field_type)
            .cloned()
            .ok_or_else(|| TypeError::UnknownType(desc.field_type.clone()))?;
        Ok(parse(value, desc)?)
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types = self.types.read().unwrap_or_else(PoisonError::into_inner);
        let mut tags: Vec<_> = types.keys().map(FieldType::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("TypeRegistry").field("types", &tags).finish()
    }
}
