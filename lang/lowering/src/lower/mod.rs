use super::ctx::*;

mod decls;
mod types;

pub trait Lower {
    type Target;

    fn lower(&self, ctx: &mut Ctx) -> Self::Target;
}

impl<T: Lower> Lower for Option<T> {
    type Target = Option<T::Target>;

    fn lower(&self, ctx: &mut Ctx) -> Self::Target {
        self.as_ref().map(|x| x.lower(ctx))
    }
}

impl<T: Lower> Lower for Vec<T> {
    type Target = Vec<T::Target>;

    fn lower(&self, ctx: &mut Ctx) -> Self::Target {
        self.iter().map(|x| x.lower(ctx)).collect()
    }
}

impl<T: Lower> Lower for Box<T> {
    type Target = Box<T::Target>;

    fn lower(&self, ctx: &mut Ctx) -> Self::Target {
        Box::new((**self).lower(ctx))
    }
}
