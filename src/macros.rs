/// Builds a [`Record`](crate::Record) from `"field" => value` pairs.
///
/// ```rust
/// use opl_text::{record, Value};
///
/// let r = record! { "name" => "milk", "cost" => 0.89 };
/// assert_eq!(r.get("cost"), Some(&Value::from(0.89)));
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };

    ($($field:expr => $value:expr),+ $(,)?) => {{
        let mut record = $crate::Record::new();
        $(
            record.insert($field, $value);
        )+
        record
    }};
}

/// Builds a [`Key`](crate::Key): scalar for one value, compound for several.
///
/// ```rust
/// use opl_text::{key, Key, Value};
///
/// assert_eq!(key!("a"), Key::Scalar(Value::from("a")));
/// assert_eq!(key!("a", 2), Key::Compound(vec![Value::from("a"), Value::from(2)]));
/// ```
#[macro_export]
macro_rules! key {
    ($value:expr $(,)?) => {
        $crate::Key::Scalar($crate::Value::from($value))
    };

    ($($value:expr),+ $(,)?) => {
        $crate::Key::Compound(vec![$($crate::Value::from($value)),+])
    };
}

#[cfg(test)]
mod tests {
    use crate::{Key, Record, Value};

    #[test]
    fn test_record_macro() {
        assert_eq!(record! {}, Record::new());

        let r = record! {
            "food" => "bread",
            "qty" => 2,
        };
        assert_eq!(r.len(), 2);
        assert_eq!(r.get("food"), Some(&Value::from("bread")));
        assert_eq!(r.get("qty"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn test_key_macro() {
        assert_eq!(key!(1.5), Key::Scalar(Value::Number(1.5)));
        let k = key!("a", "b", 3);
        assert_eq!(k.arity(), 3);
        assert_eq!(k.components()[2], Value::from(3));
    }
}
