//! Format expanders: `isDateTime`, `isEmail`, `isUrl`, `isIp`.

use crate::error::PatternError;
use crate::types::{Arity, ExpanderDefinition};
use crate::util;
use serde_json::Value;
use std::sync::Arc;

fn is_date_time(value: &Value, _args: &[Value]) -> Result<bool, PatternError> {
    Ok(util::is_datetime(value))
}

fn is_email(value: &Value, _args: &[Value]) -> Result<bool, PatternError> {
    Ok(util::is_email(value))
}

fn is_url(value: &Value, _args: &[Value]) -> Result<bool, PatternError> {
    Ok(util::is_url(value))
}

fn is_ip(value: &Value, _args: &[Value]) -> Result<bool, PatternError> {
    Ok(util::is_ip(value))
}

pub fn expanders() -> Vec<Arc<ExpanderDefinition>> {
    vec![
        Arc::new(ExpanderDefinition { name: "isDateTime", arity: Arity::Fixed(0), check_fn: is_date_time }),
        Arc::new(ExpanderDefinition { name: "isEmail", arity: Arity::Fixed(0), check_fn: is_email }),
        Arc::new(ExpanderDefinition { name: "isUrl", arity: Arity::Fixed(0), check_fn: is_url }),
        Arc::new(ExpanderDefinition { name: "isIp", arity: Arity::Fixed(0), check_fn: is_ip }),
    ]
}
