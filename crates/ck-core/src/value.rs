//! `ScriptValue` — the dynamically typed scalar scripts operate on.
//!
//! Event parameters, object variables and agent attributes all carry one of
//! these.  Agent values are weak [`AgentRef`]s; a value never keeps an agent
//! alive.

use std::fmt;

use crate::AgentRef;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ScriptValue {
    #[default]
    Null,
    Integer(i32),
    Float(f32),
    String(String),
    Agent(AgentRef),
}

impl ScriptValue {
    /// Integer view; floats truncate toward zero, everything else is `None`.
    pub fn as_integer(&self) -> Option<i32> {
        match *self {
            ScriptValue::Integer(i) => Some(i),
            ScriptValue::Float(f) => Some(f as i32),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match *self {
            ScriptValue::Integer(i) => Some(i as f32),
            ScriptValue::Float(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_agent(&self) -> Option<AgentRef> {
        match *self {
            ScriptValue::Agent(a) if !a.is_null() => Some(a),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScriptValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScriptValue::Null)
    }
}

impl From<i32> for ScriptValue {
    fn from(v: i32) -> Self {
        ScriptValue::Integer(v)
    }
}

impl From<f32> for ScriptValue {
    fn from(v: f32) -> Self {
        ScriptValue::Float(v)
    }
}

impl From<&str> for ScriptValue {
    fn from(v: &str) -> Self {
        ScriptValue::String(v.to_owned())
    }
}

impl From<String> for ScriptValue {
    fn from(v: String) -> Self {
        ScriptValue::String(v)
    }
}

impl From<AgentRef> for ScriptValue {
    fn from(v: AgentRef) -> Self {
        ScriptValue::Agent(v)
    }
}

impl fmt::Display for ScriptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptValue::Null => f.write_str("null"),
            ScriptValue::Integer(i) => write!(f, "{i}"),
            ScriptValue::Float(v) => write!(f, "{v}"),
            ScriptValue::String(s) => write!(f, "\"{s}\""),
            ScriptValue::Agent(a) => write!(f, "{a}"),
        }
    }
}
