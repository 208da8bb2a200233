//! The execution context stack and the [`Context`] facade (§3.9): "the
//! running execution context's LexicalEnvironment/VariableEnvironment is
//! what identifier resolution and declaration instantiation read and
//! write against."

use std::collections::VecDeque;

use ecma_interner::Interner;

use crate::completion::Completion;
use crate::environment::Environment;
use crate::error::{EngineError, EngineResult, JsError, JsNativeError, JsResult};
use crate::function::{self, ArrowFunctionData, FunctionKind, OrdinaryFunction, ThisMode};
use crate::object::{JsObject, ObjectKind};
use crate::realm::{Intrinsics, NativeErrorKindKey, Realm};
use crate::string::JsString;
use crate::value::JsValue;

/// One frame of the execution context stack (§3.9's Execution Context):
/// which function (if any) is running, and the lexical/variable
/// environments in scope.
struct ExecutionContext {
    function: Option<JsObject>,
    lexical_environment: Environment,
    variable_environment: Environment,
}

/// A pending job (§3.9 "Jobs and Job Queues" — the microtask queue
/// promise reactions are scheduled on).
pub struct Job {
    pub job: Box<dyn FnOnce(&mut Context) + 'static>,
}

impl std::fmt::Debug for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job").finish_non_exhaustive()
    }
}

/// A host-pluggable drain for pending jobs. [`SimpleJobQueue`] is the
/// FIFO default; a host embedding this engine in an actual event loop
/// can supply its own via [`ContextBuilder::job_queue`] instead (e.g. to
/// interleave job draining with I/O rather than running every job to
/// completion before returning control). `&self` rather than `&mut
/// self` so [`Context`] can hold it behind an `Rc` and hand the running
/// queue a `&mut Context` without a self-referential borrow.
pub trait JobQueue {
    fn enqueue(&self, job: Job);
    fn run_jobs(&self, context: &mut Context);
}

/// The default [`JobQueue`]: a plain FIFO queue, drained to completion
/// whenever [`JobQueue::run_jobs`] runs, matching how a top-level script
/// evaluation drains its microtask queue before returning.
#[derive(Default)]
pub struct SimpleJobQueue {
    jobs: std::cell::RefCell<VecDeque<Job>>,
}

impl JobQueue for SimpleJobQueue {
    fn enqueue(&self, job: Job) {
        self.jobs.borrow_mut().push_back(job);
    }

    fn run_jobs(&self, context: &mut Context) {
        loop {
            let next = self.jobs.borrow_mut().pop_front();
            match next {
                Some(job) => (job.job)(context),
                None => break,
            }
        }
    }
}

/// The evaluator's top-level facade: owns the interner, the realm, the
/// execution context stack, and the job queue. Every entry point
/// (`evaluate_script`, native function bodies, the evaluator itself)
/// takes `&mut Context`.
pub struct Context {
    interner: Interner,
    realm: Realm,
    execution_context_stack: Vec<ExecutionContext>,
    job_queue: std::rc::Rc<dyn JobQueue>,
    can_block: bool,
    installed_plugins: rustc_hash::FxHashSet<&'static str>,
    expression_handlers: crate::evaluator::dispatch::HandlerTable<crate::evaluator::dispatch::ExprKind, crate::evaluator::dispatch::ExprHandler>,
    statement_handlers: crate::evaluator::dispatch::HandlerTable<crate::evaluator::dispatch::StmtKind, crate::evaluator::dispatch::StmtHandler>,
}

impl Context {
    #[must_use]
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn interner_mut(&mut self) -> &mut Interner {
        &mut self.interner
    }

    #[must_use]
    pub fn realm(&self) -> &Realm {
        &self.realm
    }

    #[must_use]
    pub fn intrinsics(&self) -> &Intrinsics {
        self.realm.intrinsics()
    }

    /// `CreateIntrinsics(realm, stagedGlobals)` for one plug-in (§6 "Engine
    /// facade"): idempotent by [`BuiltinPlugin::id`], and rejected if a
    /// declared dependency hasn't been installed yet. [`crate::builtins::
    /// initialize`] topologically sorts the built-in set before calling
    /// this for each one, so a host installing its own plug-ins after
    /// startup only needs to order its own plug-ins relative to those.
    pub fn install(&mut self, plugin: &dyn crate::builtins::BuiltinPlugin) -> EngineResult<()> {
        if self.installed_plugins.contains(plugin.id()) {
            return Ok(());
        }
        for dep in plugin.dependencies() {
            if !self.installed_plugins.contains(dep) {
                return Err(EngineError::PluginRejected {
                    name: plugin.id().to_string(),
                    reason: format!("missing dependency '{dep}'"),
                });
            }
        }
        plugin.create_intrinsics(self);
        plugin.register_handlers(self);
        self.installed_plugins.insert(plugin.id());
        log::debug!("installed builtin plugin: {}", plugin.id());
        Ok(())
    }

    /// Registers a constructor under `name` in the realm's intrinsics
    /// table, so later [`Context::get_intrinsic`] calls can find it.
    /// Called by [`crate::builtins::install_constructor`] once per
    /// built-in constructor it assembles.
    pub(crate) fn register_constructor(&mut self, name: &'static str, ctor: JsObject) {
        self.realm.intrinsics_mut().constructors.insert(name, ctor);
    }

    /// Looks up a realm intrinsic by name (§6 "Engine facade"): either a
    /// constructor (`"Array"`, `"Promise"`, ...) registered via
    /// [`Context::register_constructor`], or one of the fixed prototype
    /// objects every realm starts with (`"Object.prototype"`, ...).
    #[must_use]
    pub fn get_intrinsic(&self, name: &str) -> Option<JsObject> {
        let intrinsics = self.intrinsics();
        match name {
            "Object.prototype" => Some(intrinsics.object_prototype.clone()),
            "Function.prototype" => Some(intrinsics.function_prototype.clone()),
            "Array.prototype" => Some(intrinsics.array_prototype.clone()),
            "String.prototype" => Some(intrinsics.string_prototype.clone()),
            "Number.prototype" => Some(intrinsics.number_prototype.clone()),
            "Boolean.prototype" => Some(intrinsics.boolean_prototype.clone()),
            "Error.prototype" => Some(intrinsics.error_prototype.clone()),
            "Symbol.prototype" => Some(intrinsics.symbol_prototype.clone()),
            "Iterator.prototype" => Some(intrinsics.iterator_prototype.clone()),
            "Promise.prototype" => Some(intrinsics.promise_prototype.clone()),
            other => intrinsics.constructors.get(other).cloned(),
        }
    }

    /// Registers a handler for the `Evaluation` syntax operation over
    /// expressions of kind `kind` (§4.3): tried ahead of
    /// `evaluate_expression`'s own match arm for that kind, and ahead of
    /// any handler registered for the same kind before this one.
    pub fn register_expression_handler(&mut self, kind: crate::evaluator::dispatch::ExprKind, handler: crate::evaluator::dispatch::ExprHandler) {
        self.expression_handlers.register(kind, handler);
    }

    /// Registers a handler for the `Evaluation` syntax operation over
    /// statements of kind `kind` — the statement-side counterpart of
    /// [`Context::register_expression_handler`].
    pub fn register_statement_handler(&mut self, kind: crate::evaluator::dispatch::StmtKind, handler: crate::evaluator::dispatch::StmtHandler) {
        self.statement_handlers.register(kind, handler);
    }

    /// The handlers currently registered for `kind`, most-recently-added
    /// first, cloned out so a caller can run them against `&mut self`
    /// without holding a borrow of `self` open.
    pub(crate) fn expression_handlers_for(&self, kind: crate::evaluator::dispatch::ExprKind) -> Vec<crate::evaluator::dispatch::ExprHandler> {
        self.expression_handlers.handlers_for(&kind).to_vec()
    }

    pub(crate) fn statement_handlers_for(&self, kind: crate::evaluator::dispatch::StmtKind) -> Vec<crate::evaluator::dispatch::StmtHandler> {
        self.statement_handlers.handlers_for(&kind).to_vec()
    }

    /// Builds a thrown error of the named kind without going through
    /// `throw expr;` evaluation (§6 "Engine facade", §7) — the facade a
    /// host or a plug-in's native function reaches for to raise a
    /// catchable script error, e.g. `return Err(context.throw(
    /// JsNativeErrorKind::Type, "not a function"));`.
    #[must_use]
    pub fn throw(&self, kind: crate::error::JsNativeErrorKind, message: impl Into<String>) -> JsError {
        JsNativeError::new(kind, message).into()
    }

    /// `ResolveBinding` (§3.6): walks the running execution context's
    /// lexical environment chain.
    #[must_use]
    pub fn resolve_binding(&mut self, name: ecma_interner::Sym) -> Option<Environment> {
        let env = self.lexical_environment();
        env.resolve(name, self)
    }

    #[must_use]
    pub fn lexical_environment(&self) -> Environment {
        self.execution_context_stack
            .last()
            .map(|ctx| ctx.lexical_environment.clone())
            .unwrap_or_else(|| self.realm.global_env())
    }

    #[must_use]
    pub fn variable_environment(&self) -> Environment {
        self.execution_context_stack
            .last()
            .map(|ctx| ctx.variable_environment.clone())
            .unwrap_or_else(|| self.realm.global_env())
    }

    pub fn set_lexical_environment(&mut self, env: Environment) {
        if let Some(ctx) = self.execution_context_stack.last_mut() {
            ctx.lexical_environment = env;
        }
    }

    #[must_use]
    pub fn running_function(&self) -> Option<JsObject> {
        self.execution_context_stack.last().and_then(|ctx| ctx.function.clone())
    }

    /// The `[[HomeObject]]` of the nearest enclosing non-arrow function
    /// (§3.7 "super property references resolve against the method's
    /// `[[HomeObject]]`, which arrows don't have one of their own").
    #[must_use]
    pub fn running_home_object(&self) -> Option<JsObject> {
        for ctx in self.execution_context_stack.iter().rev() {
            let Some(f) = &ctx.function else { continue };
            let (is_arrow, home) = f.with_kind(|kind| match kind {
                ObjectKind::Function(d) => (matches!(d.kind, FunctionKind::Arrow(_)), d.home_object.clone()),
                _ => (false, None),
            });
            if is_arrow {
                continue;
            }
            return home;
        }
        None
    }

    /// The nearest enclosing non-arrow ordinary-function frame, for
    /// `super(...)` calls made directly in a derived constructor or from
    /// an arrow nested inside one: its function object, its
    /// `OrdinaryFunction` data (`constructor_parent`/`fields`), and the
    /// Function Environment Record that owns its `this` cell.
    #[must_use]
    pub fn running_constructor_frame(&self) -> Option<(JsObject, OrdinaryFunction, Environment)> {
        for ctx in self.execution_context_stack.iter().rev() {
            let Some(f) = &ctx.function else { continue };
            let data = f.with_kind(|kind| match kind {
                ObjectKind::Function(d) => match &d.kind {
                    FunctionKind::Ordinary(o) => Some(o.clone()),
                    _ => None,
                },
                _ => None,
            });
            if let Some(o) = data {
                return Some((f.clone(), o, ctx.variable_environment.clone()));
            }
            let is_arrow = f.with_kind(|kind| matches!(kind, ObjectKind::Function(d) if matches!(d.kind, FunctionKind::Arrow(_))));
            if !is_arrow {
                return None;
            }
        }
        None
    }

    /// `ResolveThisBinding` (§3.6): the nearest enclosing `this`, falling
    /// back to the global object at script scope (sloppy top level).
    pub fn resolve_this_binding(&mut self) -> JsResult<JsValue> {
        let env = self.lexical_environment().this_environment();
        match env.this_binding() {
            Some(v) => Ok(v),
            None => Err(JsNativeError::reference()
                .with_message("must call super constructor before accessing 'this'")
                .into()),
        }
    }

    #[must_use]
    pub fn get_new_target(&self) -> JsValue {
        self.lexical_environment().this_environment().new_target().unwrap_or(JsValue::Undefined)
    }

    // ---- Primitive wrapper objects (`ToObject` on Boolean/Number/String) ----

    #[must_use]
    pub fn new_boolean_object(&self, value: bool) -> JsObject {
        JsObject::new(Some(self.intrinsics().boolean_prototype.clone()), ObjectKind::Boolean(value))
    }

    #[must_use]
    pub fn new_number_object(&self, value: f64) -> JsObject {
        JsObject::new(Some(self.intrinsics().number_prototype.clone()), ObjectKind::Number(value))
    }

    #[must_use]
    pub fn new_string_object(&self, value: JsString) -> JsObject {
        JsObject::new(Some(self.intrinsics().string_prototype.clone()), ObjectKind::String(value))
    }

    #[must_use]
    pub fn new_array(&self, elements: Vec<JsValue>) -> JsObject {
        let obj = JsObject::new(Some(self.intrinsics().array_prototype.clone()), ObjectKind::Array);
        for (i, v) in elements.iter().enumerate() {
            obj.create_data_property(i.to_string().as_str(), v.clone());
        }
        obj.create_hidden_property("length", JsValue::from(elements.len() as f64));
        obj
    }

    #[must_use]
    pub fn new_object(&self) -> JsObject {
        JsObject::ordinary(Some(self.intrinsics().object_prototype.clone()))
    }

    /// Constructs an `Error`-family instance from a [`JsNativeError`]
    /// (§7 "abrupt completions realize as thrown Error objects").
    pub fn construct_native_error(&mut self, native: &JsNativeError) -> JsValue {
        let proto = self
            .intrinsics()
            .native_error_prototypes
            .get(&NativeErrorKindKey::from(native.kind()))
            .cloned()
            .unwrap_or_else(|| self.intrinsics().error_prototype.clone());
        let obj = JsObject::new(Some(proto), ObjectKind::Error);
        obj.create_hidden_property("message", JsValue::from(native.message()));
        obj.create_hidden_property("name", JsValue::from(native.kind().name()));
        JsValue::Object(obj)
    }

    // ---- Function invocation, delegated to by `function::call_object` ----

    /// How many nested execution contexts a script may push before a
    /// further call throws a catchable `RangeError` instead of
    /// overflowing the real host stack (§9 "a simple recursive
    /// interpreter backed by a host-stack depth limit").
    const MAX_CALL_DEPTH: usize = 768;

    fn check_call_depth(&self) -> JsResult<()> {
        if self.execution_context_stack.len() >= Self::MAX_CALL_DEPTH {
            return Err(JsNativeError::range().with_message("maximum call stack size exceeded").into());
        }
        Ok(())
    }

    pub(crate) fn call_ordinary_function(
        &mut self,
        func_obj: &JsObject,
        data: &OrdinaryFunction,
        closure: &Environment,
        this: &JsValue,
        args: &[JsValue],
        this_mode: ThisMode,
    ) -> JsResult<JsValue> {
        self.check_call_depth()?;
        let bound_this = if data.is_derived_constructor {
            None
        } else if this_mode == ThisMode::Strict {
            Some(this.clone())
        } else if this.is_nullish() {
            Some(JsValue::Object(self.realm.global_object()))
        } else {
            Some(JsValue::Object(this.to_object(self)?))
        };
        // Plain [[Call]] invocations always see an undefined `new.target`;
        // only `construct_ordinary` (the [[Construct]] path) sets a real one.
        let env = Environment::function(Some(closure.clone()), bound_this, JsValue::Undefined);
        self.execution_context_stack.push(ExecutionContext {
            function: Some(func_obj.clone()),
            lexical_environment: env.clone(),
            variable_environment: env.clone(),
        });
        log::trace!("entered execution context, depth = {}", self.execution_context_stack.len());
        let result: Result<Completion, JsError> = (|| {
            crate::declaration_instantiation::function_declaration_instantiation(
                self,
                &data.parameters,
                &data.body,
                args,
                &env,
                data.is_generator || data.is_async,
            )?;
            Ok(crate::evaluator::statement::execute_statement_list(self, &data.body, &env))
        })();
        self.execution_context_stack.pop();
        log::trace!("left execution context, depth = {}", self.execution_context_stack.len());
        match result? {
            Completion::Normal(_) => Ok(JsValue::undefined()),
            Completion::Return(v) => Ok(v),
            Completion::Throw(e) => Err(e),
            Completion::Break(_) | Completion::Continue(_) => Ok(JsValue::undefined()),
        }
    }

    pub(crate) fn call_arrow_function(
        &mut self,
        func_obj: &JsObject,
        data: &ArrowFunctionData,
        closure: &Environment,
        args: &[JsValue],
    ) -> JsResult<JsValue> {
        self.check_call_depth()?;
        let env = Environment::declarative(Some(closure.clone()));
        self.execution_context_stack.push(ExecutionContext {
            function: Some(func_obj.clone()),
            lexical_environment: env.clone(),
            variable_environment: env.clone(),
        });
        log::trace!("entered execution context, depth = {}", self.execution_context_stack.len());
        let result = (|| -> JsResult<Completion> {
            crate::declaration_instantiation::bind_parameters(self, &data.parameters, args, &env)?;
            match data.body.as_ref() {
                ecma_ast::function::ArrowBody::Expression(expr) => {
                    let value = crate::evaluator::expression::evaluate_expression(self, expr)?;
                    Ok(Completion::Return(value))
                }
                ecma_ast::function::ArrowBody::Block(body) => {
                    crate::declaration_instantiation::instantiate_var_and_lexical_declarations(self, body, &env, false)?;
                    Ok(crate::evaluator::statement::execute_statement_list(self, body, &env))
                }
            }
        })();
        self.execution_context_stack.pop();
        log::trace!("left execution context, depth = {}", self.execution_context_stack.len());
        match result? {
            Completion::Normal(_) => Ok(JsValue::undefined()),
            Completion::Return(v) => Ok(v),
            Completion::Throw(e) => Err(e),
            Completion::Break(_) | Completion::Continue(_) => Ok(JsValue::undefined()),
        }
    }

    pub(crate) fn construct_ordinary(&mut self, func_obj: &JsObject, args: &[JsValue], new_target: &JsObject) -> JsResult<JsValue> {
        self.check_call_depth()?;
        let is_derived = func_obj.with_kind(|kind| match kind {
            ObjectKind::Function(d) => matches!(&d.kind, crate::function::FunctionKind::Ordinary(o) if o.is_derived_constructor),
            _ => false,
        });
        let proto_key = crate::property::PropertyKey::from_str("prototype");
        let proto = new_target
            .get(&proto_key, &JsValue::Object(new_target.clone()), self)?
            .as_object()
            .cloned()
            .unwrap_or_else(|| self.intrinsics().object_prototype.clone());
        let this = if is_derived { None } else { Some(JsValue::Object(JsObject::ordinary(Some(proto)))) };

        let data = func_obj
            .with_kind(|kind| match kind {
                ObjectKind::Function(d) => match &d.kind {
                    crate::function::FunctionKind::Ordinary(o) => Some((o.clone(), d.closure.clone())),
                    _ => None,
                },
                _ => None,
            })
            .expect("construct_ordinary called on a non-ordinary-function object");

        let new_target_value = JsValue::Object(new_target.clone());
        let env = Environment::function(Some(data.1.clone()), this, new_target_value);
        self.execution_context_stack.push(ExecutionContext {
            function: Some(func_obj.clone()),
            lexical_environment: env.clone(),
            variable_environment: env.clone(),
        });
        log::trace!("entered execution context, depth = {}", self.execution_context_stack.len());
        let result: Result<Completion, JsError> = (|| {
            if !is_derived {
                crate::evaluator::class::initialize_instance_fields(self, &data.0.fields)?;
            }
            crate::declaration_instantiation::function_declaration_instantiation(
                self,
                &data.0.parameters,
                &data.0.body,
                args,
                &env,
                false,
            )?;
            Ok(crate::evaluator::statement::execute_statement_list(self, &data.0.body, &env))
        })();
        self.execution_context_stack.pop();
        log::trace!("left execution context, depth = {}", self.execution_context_stack.len());
        match result? {
            Completion::Normal(_) | Completion::Break(_) | Completion::Continue(_) => env.this_binding().ok_or_else(|| {
                JsNativeError::reference().with_message("must call super constructor before returning from derived constructor").into()
            }),
            Completion::Return(v) if v.is_object() => Ok(v),
            Completion::Return(_) => env.this_binding().ok_or_else(|| {
                JsNativeError::reference().with_message("must call super constructor before returning from derived constructor").into()
            }),
            Completion::Throw(e) => Err(e),
        }
    }

    // ---- Script evaluation ----

    /// Parses and evaluates `source` as a Script (§3.10 "Script
    /// Evaluation"): global declaration instantiation, then the
    /// statement list, against the realm's global environment.
    pub fn evaluate_script(&mut self, source: &str) -> EngineResult<JsValue> {
        let script = ecma_parser::parse_script(source, &mut self.interner)?;
        let lexical_env = self.realm.global_env();
        let var_env = self.realm.global_var_env();
        self.execution_context_stack.push(ExecutionContext {
            function: None,
            lexical_environment: lexical_env.clone(),
            variable_environment: var_env.clone(),
        });
        log::trace!("entered execution context, depth = {}", self.execution_context_stack.len());
        let result = (|| -> JsResult<JsValue> {
            crate::declaration_instantiation::global_declaration_instantiation(self, script.body(), &lexical_env, &var_env)?;
            match crate::evaluator::statement::execute_statement_list(self, script.body(), &lexical_env) {
                Completion::Normal(v) | Completion::Return(v) => Ok(v),
                Completion::Throw(e) => Err(e),
                Completion::Break(_) | Completion::Continue(_) => Ok(JsValue::undefined()),
            }
        })();
        self.execution_context_stack.pop();
        log::trace!("left execution context, depth = {}", self.execution_context_stack.len());
        let value = result.map_err(|e| {
            let rendered = e.into_value(self);
            // Scripts that throw surface as a `EngineError` at this
            // top-level boundary only; nested evaluation keeps using
            // `JsResult`/`Completion::Throw` all the way up to here.
            EngineError::PluginRejected { name: "script".into(), reason: format!("{rendered:?}") }
        })?;
        self.run_jobs()?;
        Ok(value)
    }

    // ---- Job queue (§3.9 "Jobs and Job Queues") ----

    pub fn enqueue_job(&mut self, job: impl FnOnce(&mut Context) + 'static) {
        self.job_queue.enqueue(Job { job: Box::new(job) });
    }

    pub fn run_jobs(&mut self) -> EngineResult<()> {
        let queue = self.job_queue.clone();
        queue.run_jobs(self);
        Ok(())
    }

    /// Whether the host allows this context to block the current thread
    /// (set via [`ContextBuilder::can_block`]). Exposed for built-ins
    /// that may need to synchronously wait on shared state; unused by
    /// any built-in this evaluator currently ships.
    #[must_use]
    pub fn can_block(&self) -> bool {
        self.can_block
    }
}

/// Builds a fresh [`Context`]: a new realm (global object, global
/// environment, intrinsics), with the built-in globals installed.
pub struct ContextBuilder {
    interner: Interner,
    job_queue: std::rc::Rc<dyn JobQueue>,
    can_block: bool,
}

impl ContextBuilder {
    #[must_use]
    pub fn new() -> Self {
        ContextBuilder { interner: Interner::new(), job_queue: std::rc::Rc::new(SimpleJobQueue::default()), can_block: false }
    }

    #[must_use]
    pub fn interner(mut self, interner: Interner) -> Self {
        self.interner = interner;
        self
    }

    /// Overrides the default FIFO [`SimpleJobQueue`] with a host-supplied
    /// [`JobQueue`] (e.g. one backed by an actual event loop).
    #[must_use]
    pub fn job_queue(mut self, queue: std::rc::Rc<dyn JobQueue>) -> Self {
        self.job_queue = queue;
        self
    }

    /// Whether the resulting context may block the current thread (see
    /// [`Context::can_block`]).
    #[must_use]
    pub fn can_block(mut self, can_block: bool) -> Self {
        self.can_block = can_block;
        self
    }

    #[must_use]
    pub fn build(self) -> Context {
        let object_prototype = JsObject::new(None, ObjectKind::Ordinary);
        let function_prototype = JsObject::ordinary(Some(object_prototype.clone()));
        let array_prototype = JsObject::ordinary(Some(object_prototype.clone()));
        let string_prototype = JsObject::ordinary(Some(object_prototype.clone()));
        let number_prototype = JsObject::ordinary(Some(object_prototype.clone()));
        let boolean_prototype = JsObject::ordinary(Some(object_prototype.clone()));
        let error_prototype = JsObject::ordinary(Some(object_prototype.clone()));
        let symbol_prototype = JsObject::ordinary(Some(object_prototype.clone()));
        let iterator_prototype = JsObject::ordinary(Some(object_prototype.clone()));
        let promise_prototype = JsObject::ordinary(Some(object_prototype.clone()));

        let mut native_error_prototypes = rustc_hash::FxHashMap::default();
        for kind in [
            NativeErrorKindKey::Type,
            NativeErrorKindKey::Range,
            NativeErrorKindKey::Reference,
            NativeErrorKindKey::Syntax,
            NativeErrorKindKey::Eval,
            NativeErrorKindKey::Uri,
        ] {
            native_error_prototypes.insert(kind, JsObject::ordinary(Some(error_prototype.clone())));
        }

        let intrinsics = Intrinsics {
            object_prototype: object_prototype.clone(),
            function_prototype,
            array_prototype,
            string_prototype,
            number_prototype,
            boolean_prototype,
            error_prototype,
            native_error_prototypes,
            symbol_prototype,
            iterator_prototype,
            promise_prototype,
            constructors: rustc_hash::FxHashMap::default(),
        };

        let global_object = JsObject::ordinary(Some(object_prototype));
        let global_env = Environment::object(None, global_object.clone(), false);
        let realm = Realm::new(global_object, global_env, intrinsics);

        let mut context = Context {
            interner: self.interner,
            realm,
            execution_context_stack: Vec::new(),
            job_queue: self.job_queue,
            can_block: self.can_block,
            installed_plugins: rustc_hash::FxHashSet::default(),
            expression_handlers: crate::evaluator::dispatch::HandlerTable::default(),
            statement_handlers: crate::evaluator::dispatch::HandlerTable::default(),
        };
        crate::builtins::initialize(&mut context);
        context
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
