mod spinner;

pub(crate) use spinner::Spinner;
