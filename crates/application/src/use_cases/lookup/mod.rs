mod handle_lookup;

pub use handle_lookup::HandleLookupUseCase;
