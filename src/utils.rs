use serde::Serialize;

/// Render a value as JSON for log lines; logging must never fail, so
/// serialization errors degrade to an empty string.
pub(crate) fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Fully qualified type name, used wherever a report message names the
/// exported entity type.
pub(crate) fn type_label<T>() -> &'static str {
    std::any::type_name::<T>()
}

/// Last path segment of the type name; view exporters use it as the view
/// name to look up per schema.
pub(crate) fn short_type_name<T>() -> &'static str {
    let name = std::any::type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SampleView;

    #[test]
    fn short_type_name_drops_module_path() {
        assert_eq!(short_type_name::<SampleView>(), "SampleView");
    }

    #[test]
    fn type_label_keeps_module_path() {
        assert!(type_label::<SampleView>().ends_with("SampleView"));
        assert!(type_label::<SampleView>().contains("::"));
    }
}
