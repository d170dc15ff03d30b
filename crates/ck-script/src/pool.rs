//! `InterpreterPool` — interpreter instances recycled across events.
//!
//! Instances are addressed by [`InterpreterId`] (their index in `slots`).
//! The pool only ever grows: an instance that has been built stays alive for
//! as long as the pool does and is handed out again from the free-list.
//! Acquire/release pairs nest inside one event dispatch, so in steady state
//! the pool holds one instance and no event allocates.

use ck_core::{AgentRef, InterpreterId, ScriptValue};

use crate::{Interpreter, ScriptEngine, ScriptEnv, ScriptResult};

pub struct InterpreterPool<E: ScriptEngine> {
    engine: E,
    slots:  Vec<E::Interpreter>,
    in_use: Vec<bool>,
    /// Ids of idle instances; the most recently released is reused first.
    free:   Vec<InterpreterId>,
}

impl<E: ScriptEngine> InterpreterPool<E> {
    pub fn new(engine: E) -> Self {
        Self { engine, slots: Vec::new(), in_use: Vec::new(), free: Vec::new() }
    }

    /// An idle instance, building a new one if none is free.
    pub fn acquire(&mut self) -> InterpreterId {
        let id = match self.free.pop() {
            Some(id) => id,
            None => {
                let id = InterpreterId(self.slots.len() as u32);
                self.slots.push(self.engine.new_interpreter(id));
                self.in_use.push(false);
                log::debug!("interpreter pool: grew to {} instance(s)", self.slots.len());
                id
            }
        };
        self.in_use[id.index()] = true;
        id
    }

    /// Return `id` to the free-list.
    ///
    /// # Panics
    ///
    /// If the instance still has an owner (unbind it first), or is not
    /// currently acquired.
    pub fn release(&mut self, id: InterpreterId) {
        let slot = id.index();
        assert!(
            self.in_use.get(slot).copied().unwrap_or(false),
            "{id} released but not acquired"
        );
        if let Some(owner) = self.slots[slot].owner() {
            panic!("{id} released while still bound to {owner}");
        }
        self.in_use[slot] = false;
        self.free.push(id);
    }

    /// One invocation on acquired instance `id`: bind to `owner` (if any),
    /// seed the parameters, run, and unbind.  The instance is unbound even
    /// when the script fails.
    ///
    /// # Panics
    ///
    /// If `id` is not currently acquired.
    #[allow(clippy::too_many_arguments)]
    pub fn run_on(
        &mut self,
        id:     InterpreterId,
        owner:  Option<AgentRef>,
        from:   AgentRef,
        p0:     ScriptValue,
        p1:     ScriptValue,
        script: &E::Script,
        env:    &mut ScriptEnv<'_>,
    ) -> ScriptResult<()> {
        assert!(self.is_in_use(id), "{id} run but not acquired");
        let interp = &mut self.slots[id.index()];
        if let Some(owner) = owner {
            interp.bind(owner);
        }
        interp.set_variables(from, p0, p1);
        let result = interp.run(script, env);
        interp.unbind();
        result
    }

    pub fn get(&self, id: InterpreterId) -> Option<&E::Interpreter> {
        self.slots.get(id.index())
    }

    pub fn get_mut(&mut self, id: InterpreterId) -> Option<&mut E::Interpreter> {
        self.slots.get_mut(id.index())
    }

    pub fn is_in_use(&self, id: InterpreterId) -> bool {
        self.in_use.get(id.index()).copied().unwrap_or(false)
    }

    /// Instances ever built.  Never decreases.
    pub fn instance_count(&self) -> usize {
        self.slots.len()
    }

    pub fn idle_count(&self) -> usize {
        self.free.len()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}
