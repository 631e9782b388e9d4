pub mod capabilities;
pub mod types;
pub mod visitor;

mod glutin {
    use gl;
    use glutin::{GlContext, GlWindow};

    use super::visitor::GLVisitor;
    use crate::errors::*;

    impl GLVisitor {
        /// Makes the context of `window` current and loads the GL functions
        /// through it.
        pub unsafe fn glutin(window: &GlWindow) -> Result<Self> {
            window
                .make_current()
                .map_err(|err| Error::Backend(format!("{:?}", err)))?;

            gl::load_with(|symbol| window.get_proc_address(symbol) as *const _);
            Self::new()
        }
    }
}
