//! Initial form values

use crate::descriptor::FieldSet;
use steady_core::ValueMap;

/// Merge caller-supplied initial values over the kinds' empty values.
///
/// Every declared field gets exactly one entry, in descriptor order. A key
/// present in `initial` wins even when its value is `null`. Keys that name
/// no declared field are carried along after the declared ones, so record
/// identifiers survive a round trip through the form.
///
/// # Examples
///
/// ```
/// use steady_forms::{FieldDescriptor, FieldSet, derive_initial_values};
/// use steady_core::ValueMap;
/// use serde_json::json;
///
/// let fields = FieldSet::new(vec![
///     FieldDescriptor::text("name"),
///     FieldDescriptor::number("price"),
///     FieldDescriptor::checkbox("active"),
/// ])
/// .unwrap();
///
/// let mut initial = ValueMap::new();
/// initial.insert("name".into(), json!("Laptop"));
///
/// let values = derive_initial_values(&fields, &initial);
/// assert_eq!(values["name"], json!("Laptop"));
/// assert_eq!(values["price"], json!(null));
/// assert_eq!(values["active"], json!(false));
/// ```
pub fn derive_initial_values(fields: &FieldSet, initial: &ValueMap) -> ValueMap {
	let mut values: ValueMap = fields
		.iter()
		.map(|field| {
			let value = initial
				.get(&field.name)
				.cloned()
				.unwrap_or_else(|| field.kind.empty_value());
			(field.name.clone(), value)
		})
		.collect();

	for (key, value) in initial {
		if !values.contains_key(key) {
			values.insert(key.clone(), value.clone());
		}
	}
	values
}
