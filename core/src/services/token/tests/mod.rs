mod factory_tests;
mod signer_tests;
