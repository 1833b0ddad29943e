//! Generic parameter substitution for built-in containers.

use talon_core::DataType;

/// Maps a class's generic parameter names to the receiver's type
/// arguments (`T` to `Integer` for a `List<Integer>` receiver).
#[derive(Debug, Clone, Default)]
pub struct TypeBindings {
    params: Vec<String>,
    args: Vec<DataType>,
}

impl TypeBindings {
    /// No generic parameters.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(params: &[String], args: &[DataType]) -> Self {
        Self {
            params: params.to_vec(),
            args: args.to_vec(),
        }
    }

    fn position(&self, ty: &DataType) -> Option<usize> {
        if !ty.args().is_empty() {
            return None;
        }
        self.params.iter().position(|p| ty.is(p))
    }

    /// Whether `ty` is one of the generic parameters.
    pub fn is_param(&self, ty: &DataType) -> bool {
        self.position(ty).is_some()
    }

    /// Whether `ty` is a generic parameter with no argument bound to it.
    pub fn is_unbound(&self, ty: &DataType) -> bool {
        self.position(ty).is_some_and(|i| i >= self.args.len())
    }

    /// Replace bound parameters inside `ty`.
    pub fn substitute(&self, ty: &DataType) -> DataType {
        if let Some(i) = self.position(ty) {
            return self.args.get(i).cloned().unwrap_or_else(|| ty.clone());
        }
        if ty.args().is_empty() {
            return ty.clone();
        }
        DataType::generic(
            ty.name(),
            ty.args().iter().map(|arg| self.substitute(arg)).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_bindings() -> TypeBindings {
        TypeBindings::new(
            &["K".to_string(), "V".to_string()],
            &[DataType::string(), DataType::integer()],
        )
    }

    #[test]
    fn substitutes_nested_parameters() {
        let bindings = map_bindings();
        let key_list = DataType::list_of(DataType::simple("K"));
        assert_eq!(
            bindings.substitute(&key_list),
            DataType::list_of(DataType::string())
        );
        assert_eq!(bindings.substitute(&DataType::simple("V")), DataType::integer());
        assert_eq!(bindings.substitute(&DataType::boolean()), DataType::boolean());
    }

    #[test]
    fn missing_arguments_leave_parameters_unbound() {
        let bindings = TypeBindings::new(&["T".to_string()], &[]);
        let t = DataType::simple("T");
        assert!(bindings.is_unbound(&t));
        assert_eq!(bindings.substitute(&t), t);
        assert!(!TypeBindings::none().is_param(&t));
    }
}
