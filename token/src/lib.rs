pub type Result<T> = std::result::Result<T, errors::intl::IntlErrors>;

pub mod ft;
