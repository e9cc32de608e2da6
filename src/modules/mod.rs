pub mod books;

use bookstall_kernel::ModuleRegistry;

/// Register all storefront modules with the registry.
pub fn register_all(registry: &mut ModuleRegistry) {
    registry.register(books::create_module());
}
