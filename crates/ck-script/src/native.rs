//! A closure-backed script engine.
//!
//! Script bodies are plain Rust closures.  This is the engine the demo and
//! the tests run on; a real language plugs in through the same
//! [`ScriptEngine`] and [`ScriptCompiler`] traits.
//!
//! # Manifest compiler
//!
//! [`NativeCompiler`] reads a line-oriented manifest that wires named bodies
//! from its library to classifiers:
//!
//! ```text
//! * comment
//! scrp 2 8 1 9  blink        install `blink` as event 9 of 2 8 1
//! inst seed_world            run `seed_world` once after installing
//! ```

use std::collections::hash_map::Entry;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use ck_agent::Classifier;
use ck_core::{AgentRef, InterpreterId, ScriptNo, ScriptValue};

use crate::{
    CompiledUnit, Interpreter, ScriptCompiler, ScriptEngine, ScriptEnv, ScriptError, ScriptInstall,
    ScriptResult,
};

/// Number of local variables (`VA00`–`VA99`) per invocation.
pub const LOCAL_VAR_COUNT: usize = 100;

type Body = dyn Fn(&mut NativeFrame, &mut ScriptEnv<'_>) -> ScriptResult<()>;

// ── NativeScript ──────────────────────────────────────────────────────────────

/// A named script body.  Cloning shares the closure.
#[derive(Clone)]
pub struct NativeScript {
    name: Rc<str>,
    body: Rc<Body>,
}

impl NativeScript {
    pub fn new<F>(name: &str, body: F) -> Self
    where
        F: Fn(&mut NativeFrame, &mut ScriptEnv<'_>) -> ScriptResult<()> + 'static,
    {
        Self { name: Rc::from(name), body: Rc::new(body) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for NativeScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NativeScript").field(&self.name).finish()
    }
}

// ── NativeFrame ───────────────────────────────────────────────────────────────

/// Per-invocation state: the event's origin and parameters plus locals.
/// Reset by every `unbind`.
#[derive(Debug)]
pub struct NativeFrame {
    pub from: AgentRef,
    pub p0:   ScriptValue,
    pub p1:   ScriptValue,
    locals:   Vec<ScriptValue>,
}

impl Default for NativeFrame {
    fn default() -> Self {
        Self {
            from:   AgentRef::NULL,
            p0:     ScriptValue::Null,
            p1:     ScriptValue::Null,
            locals: vec![ScriptValue::Null; LOCAL_VAR_COUNT],
        }
    }
}

impl NativeFrame {
    pub fn local(&self, n: usize) -> ScriptResult<&ScriptValue> {
        self.locals.get(n).ok_or(ScriptError::BadVariable(n))
    }

    pub fn set_local(&mut self, n: usize, value: ScriptValue) -> ScriptResult<()> {
        let slot = self.locals.get_mut(n).ok_or(ScriptError::BadVariable(n))?;
        *slot = value;
        Ok(())
    }

    fn reset(&mut self) {
        self.from = AgentRef::NULL;
        self.p0 = ScriptValue::Null;
        self.p1 = ScriptValue::Null;
        self.locals.fill(ScriptValue::Null);
    }
}

// ── Interpreter / engine ──────────────────────────────────────────────────────

pub struct NativeInterpreter {
    id:    InterpreterId,
    owner: Option<AgentRef>,
    frame: NativeFrame,
    runs:  u64,
}

impl NativeInterpreter {
    pub fn id(&self) -> InterpreterId {
        self.id
    }

    /// Bodies run by this instance over its lifetime.
    pub fn runs(&self) -> u64 {
        self.runs
    }

    pub fn frame(&self) -> &NativeFrame {
        &self.frame
    }
}

impl Interpreter for NativeInterpreter {
    type Script = NativeScript;

    fn bind(&mut self, owner: AgentRef) {
        debug_assert!(self.owner.is_none(), "{} bound twice", self.id);
        self.owner = Some(owner);
    }

    fn unbind(&mut self) {
        self.owner = None;
        self.frame.reset();
    }

    fn owner(&self) -> Option<AgentRef> {
        self.owner
    }

    fn set_variables(&mut self, from: AgentRef, p0: ScriptValue, p1: ScriptValue) {
        self.frame.from = from;
        self.frame.p0 = p0;
        self.frame.p1 = p1;
    }

    fn run(&mut self, script: &NativeScript, env: &mut ScriptEnv<'_>) -> ScriptResult<()> {
        self.runs += 1;
        (*script.body)(&mut self.frame, env)
    }
}

#[derive(Default)]
pub struct NativeEngine {
    built: usize,
}

impl NativeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpreters this engine has constructed.
    pub fn built(&self) -> usize {
        self.built
    }
}

impl ScriptEngine for NativeEngine {
    type Script = NativeScript;
    type Interpreter = NativeInterpreter;

    fn new_interpreter(&mut self, id: InterpreterId) -> NativeInterpreter {
        self.built += 1;
        NativeInterpreter { id, owner: None, frame: NativeFrame::default(), runs: 0 }
    }
}

// ── NativeCompiler ────────────────────────────────────────────────────────────

/// Compiles manifests against a library of named bodies.
#[derive(Default)]
pub struct NativeCompiler {
    library: FxHashMap<String, NativeScript>,
}

impl NativeCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `script` available to manifests under its name.
    pub fn register(&mut self, script: NativeScript) -> &mut Self {
        self.library.insert(script.name().to_owned(), script);
        self
    }

    pub fn with(mut self, script: NativeScript) -> Self {
        self.register(script);
        self
    }

    fn lookup(&self, path: &Path, line: usize, name: &str) -> ScriptResult<NativeScript> {
        self.library.get(name).cloned().ok_or_else(|| ScriptError::Compile {
            path:    path.to_path_buf(),
            line,
            message: format!("unknown script body {name:?}"),
        })
    }
}

impl ScriptCompiler for NativeCompiler {
    type Script = NativeScript;

    fn compile(&mut self, path: &Path, source: &str) -> ScriptResult<CompiledUnit<NativeScript>> {
        let mut unit = CompiledUnit::default();
        let mut seen: FxHashMap<(Classifier, ScriptNo), usize> = FxHashMap::default();
        let err = |line: usize, message: String| ScriptError::Compile { path: path.to_path_buf(), line, message };

        for (i, raw) in source.lines().enumerate() {
            let line = i + 1;
            let text = raw.trim();
            if text.is_empty() || text.starts_with('*') {
                continue;
            }
            let words: Vec<&str> = text.split_whitespace().collect();
            match words.as_slice() {
                ["scrp", f, g, s, e, name] => {
                    let classifier = Classifier::new(
                        f.parse().map_err(|_| err(line, format!("bad family {f:?}")))?,
                        g.parse().map_err(|_| err(line, format!("bad genus {g:?}")))?,
                        s.parse().map_err(|_| err(line, format!("bad species {s:?}")))?,
                    );
                    let selector = ScriptNo(e.parse().map_err(|_| err(line, format!("bad event number {e:?}")))?);
                    match seen.entry((classifier, selector)) {
                        Entry::Occupied(first) => {
                            return Err(err(
                                line,
                                format!("{classifier} {selector} already defined on line {}", first.get()),
                            ));
                        }
                        Entry::Vacant(v) => {
                            v.insert(line);
                        }
                    }
                    let script = self.lookup(path, line, name)?;
                    unit.installs.push(ScriptInstall { classifier, selector, script });
                }
                ["inst", name] => {
                    if unit.installer.is_some() {
                        return Err(err(line, "second installer".into()));
                    }
                    unit.installer = Some(self.lookup(path, line, name)?);
                }
                [word, ..] => return Err(err(line, format!("unexpected {word:?}"))),
                [] => {}
            }
        }
        Ok(unit)
    }
}
