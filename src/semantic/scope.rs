//! Scoped symbol tables
//!
//! Scopes are stored in an arena ([`ScopeForest`]) and addressed by
//! [`ScopeId`]. Each scope owns its symbols, knows its parent by id and maps
//! the names of functions defined in it to their child scopes. The forest
//! also keeps a flat registry from function name to scope so a pass can jump
//! straight to a function's scope.

use rustc_hash::FxHashMap;
use std::fmt;

/// Builtin type names, inserted into the global scope before anything else.
pub const BUILTIN_TYPES: [&str; 5] = ["int", "float", "char", "bool", "string"];

/// Name of the global scope.
pub const GLOBAL_SCOPE: &str = "global";

/// Index of a scope in its forest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// Address of a symbol: owning scope plus position inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolRef {
    pub scope: ScopeId,
    index: usize,
}

/// What a symbol names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    BuiltinType,
    Variable,
    FormalParameter,
    Function {
        params: Vec<SymbolRef>,
        return_type: String,
    },
}

/// A named entity with its declared type and a usage counter
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// The type symbol this was declared with, `None` for types, functions
    /// and declarations whose type did not resolve
    pub ty: Option<SymbolRef>,
    /// Type name as written at the declaration (element type for arrays)
    pub written_type: Option<String>,
    pub uses: u32,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, ty: Option<SymbolRef>) -> Self {
        Self {
            name: name.into(),
            kind,
            ty,
            written_type: None,
            uses: 0,
        }
    }

    pub fn written_as(mut self, type_name: &str) -> Self {
        self.written_type = Some(type_name.to_string());
        self
    }

    pub fn is_type(&self) -> bool {
        self.kind == SymbolKind::BuiltinType
    }
}

/// One lexical scope
#[derive(Debug, Clone)]
pub struct Scope {
    pub name: String,
    pub level: usize,
    pub parent: Option<ScopeId>,
    symbols: Vec<Symbol>,
    by_name: FxHashMap<String, usize>,
    children: FxHashMap<String, ScopeId>,
}

impl Scope {
    fn new(name: &str, level: usize, parent: Option<ScopeId>) -> Self {
        Self {
            name: name.to_string(),
            level,
            parent,
            symbols: Vec::new(),
            by_name: FxHashMap::default(),
            children: FxHashMap::default(),
        }
    }

    /// Symbols in insertion order
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Variables in insertion order (parameters and functions excluded)
    pub fn variables(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols
            .iter()
            .filter(|s| s.kind == SymbolKind::Variable)
    }

    /// Scope of a function defined directly in this scope
    pub fn child(&self, name: &str) -> Option<ScopeId> {
        self.children.get(name).copied()
    }
}

/// Arena of all scopes built for one program
#[derive(Debug, Clone)]
pub struct ScopeForest {
    scopes: Vec<Scope>,
    functions: FxHashMap<String, ScopeId>,
}

impl Default for ScopeForest {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeForest {
    /// Create a forest holding only the global scope with the builtin types.
    pub fn new() -> Self {
        let mut forest = Self {
            scopes: vec![Scope::new(GLOBAL_SCOPE, 0, None)],
            functions: FxHashMap::default(),
        };
        let global = forest.global();
        for name in BUILTIN_TYPES {
            // the builtin names are distinct, so none of these can clash
            let _ = forest.insert(global, Symbol::new(name, SymbolKind::BuiltinType, None));
        }
        forest
    }

    pub fn global(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn scopes(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.scopes.iter().enumerate().map(|(i, s)| (ScopeId(i), s))
    }

    /// Create the scope of function `name` nested in `parent`, and register
    /// it both as a child of `parent` and in the function registry.
    pub fn create_function_scope(&mut self, parent: ScopeId, name: &str) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        let level = self.scope(parent).level + 1;
        self.scopes.push(Scope::new(name, level, Some(parent)));
        self.scopes[parent.0].children.insert(name.to_string(), id);
        self.functions.insert(name.to_string(), id);
        id
    }

    /// Look a function's scope up by name, independent of nesting.
    pub fn function_scope(&self, name: &str) -> Option<ScopeId> {
        self.functions.get(name).copied()
    }

    /// Insert a symbol, keeping the first one if the name is already taken.
    /// Returns `Err` with the existing symbol on a clash.
    pub fn insert(&mut self, scope: ScopeId, symbol: Symbol) -> Result<SymbolRef, SymbolRef> {
        if let Some(existing) = self.lookup_local(scope, &symbol.name) {
            return Err(existing);
        }
        let table = &mut self.scopes[scope.0];
        let index = table.symbols.len();
        table.by_name.insert(symbol.name.clone(), index);
        table.symbols.push(symbol);
        Ok(SymbolRef { scope, index })
    }

    /// Look a name up in `scope` only.
    pub fn lookup_local(&self, scope: ScopeId, name: &str) -> Option<SymbolRef> {
        self.scope(scope)
            .by_name
            .get(name)
            .map(|&index| SymbolRef { scope, index })
    }

    /// Look a name up in `scope`, then in each enclosing scope.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<SymbolRef> {
        let mut current = Some(scope);
        while let Some(id) = current {
            if let Some(found) = self.lookup_local(id, name) {
                return Some(found);
            }
            current = self.scope(id).parent;
        }
        None
    }

    /// Chained lookup that counts a use of the symbol found.
    pub fn resolve(&mut self, scope: ScopeId, name: &str) -> Option<SymbolRef> {
        let found = self.lookup(scope, name)?;
        self.symbol_mut(found).uses += 1;
        Some(found)
    }

    pub fn symbol(&self, symbol: SymbolRef) -> &Symbol {
        &self.scope(symbol.scope).symbols[symbol.index]
    }

    pub fn symbol_mut(&mut self, symbol: SymbolRef) -> &mut Symbol {
        &mut self.scopes[symbol.scope.0].symbols[symbol.index]
    }

    /// Name of the type a symbol was declared with, if it resolved.
    pub fn type_name(&self, symbol: &Symbol) -> Option<&str> {
        symbol.ty.map(|ty| self.symbol(ty).name.as_str())
    }
}

/// Symbol table dump: one block per scope in creation order, each symbol
/// with its kind, type and use count.
impl fmt::Display for ScopeForest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, scope) in self.scopes() {
            match scope.parent {
                Some(parent) => writeln!(
                    f,
                    "Scope '{}' (level {}, enclosing '{}')",
                    scope.name,
                    scope.level,
                    self.scope(parent).name
                )?,
                None => writeln!(f, "Scope '{}' (level {})", scope.name, scope.level)?,
            }

            let nested: Vec<&str> = self
                .scopes()
                .filter(|(_, child)| child.parent == Some(id))
                .map(|(_, child)| child.name.as_str())
                .collect();
            if !nested.is_empty() {
                writeln!(f, "  nested: {}", nested.join(", "))?;
            }

            for symbol in scope.symbols() {
                let ty = symbol
                    .written_type
                    .as_deref()
                    .or_else(|| self.type_name(symbol))
                    .unwrap_or("?");
                let description = match &symbol.kind {
                    SymbolKind::BuiltinType => "builtin type".to_string(),
                    SymbolKind::Variable => format!("variable {}", ty),
                    SymbolKind::FormalParameter => format!("parameter {}", ty),
                    SymbolKind::Function {
                        params,
                        return_type,
                    } => {
                        let names: Vec<&str> = params
                            .iter()
                            .map(|&param| self.symbol(param).name.as_str())
                            .collect();
                        format!("function ({}) -> {}", names.join(", "), return_type)
                    }
                };
                writeln!(f, "  {}: {}, uses {}", symbol.name, description, symbol.uses)?;
            }
        }
        Ok(())
    }
}
