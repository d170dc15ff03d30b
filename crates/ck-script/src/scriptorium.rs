//! `Scriptorium` — installed scripts, keyed by classifier and event number.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use ck_agent::Classifier;
use ck_core::ScriptNo;

use crate::ScriptInstall;

/// The table scripts are looked up in when an event is dispatched.
///
/// Scripts are shared as `Rc<S>` so a dispatch can hold one while the table
/// itself is being modified by an installer.
pub struct Scriptorium<S> {
    scripts: FxHashMap<(Classifier, ScriptNo), Rc<S>>,
}

impl<S> Default for Scriptorium<S> {
    fn default() -> Self {
        Self { scripts: FxHashMap::default() }
    }
}

impl<S> Scriptorium<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `script`, returning the one it replaced.
    pub fn install(&mut self, classifier: Classifier, selector: ScriptNo, script: S) -> Option<Rc<S>> {
        self.scripts.insert((classifier, selector), Rc::new(script))
    }

    /// Install every entry of a compiled unit.  Returns how many.
    pub fn install_all(&mut self, installs: Vec<ScriptInstall<S>>) -> usize {
        let n = installs.len();
        for ScriptInstall { classifier, selector, script } in installs {
            self.install(classifier, selector, script);
        }
        n
    }

    pub fn remove(&mut self, classifier: Classifier, selector: ScriptNo) -> Option<Rc<S>> {
        self.scripts.remove(&(classifier, selector))
    }

    /// Exact match only.
    pub fn get(&self, classifier: Classifier, selector: ScriptNo) -> Option<&Rc<S>> {
        self.scripts.get(&(classifier, selector))
    }

    /// Most specific match along [`Classifier::fallbacks`].
    pub fn find(&self, classifier: Classifier, selector: ScriptNo) -> Option<Rc<S>> {
        classifier
            .fallbacks()
            .into_iter()
            .find_map(|c| self.scripts.get(&(c, selector)))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}
