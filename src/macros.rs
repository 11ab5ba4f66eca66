#[macro_export]
macro_rules! operator {
    (
        name: $name:expr,
        label: $label:expr,
        evaluators: [ $($ev:expr),* $(,)? ]
        $(,)?
    ) => {
        $crate::Operator {
            name: ($name).into(),
            label: ($label).into(),
            evaluators: vec![ $( std::sync::Arc::new($ev) as $crate::Comparator ),* ],
        }
    };
}

#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };
    ( $($key:expr => $value:expr),* $(,)? ) => {{
        let mut record = $crate::Record::new();
        $( record.insert(String::from($key), $crate::Value::from($value)); )*
        record
    }};
}
