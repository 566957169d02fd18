use id_arena::Arena;

use super::{binding::Binding, definition::Definition, reference::Reference, scope::Scope};

#[derive(Default)]
pub struct AllArenas<'a> {
    pub references: Arena<Reference<'a>>,
    pub scopes: Arena<Scope<'a>>,
    pub bindings: Arena<Binding<'a>>,
    pub definitions: Arena<Definition<'a>>,
}
