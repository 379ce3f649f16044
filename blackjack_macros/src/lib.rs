use proc_macro::TokenStream as TokenStream1;
use quote::ToTokens;
use syn::{self, parse_macro_input, parse_quote};

/// This macro is added before a method of `RoundSimulator` in the impl block.
/// Use this macro to first check if the current round phase is exactly the
/// phase in the attribute.
///
/// For example, `#[allowed_phase(Deal)]` will make a method first check
/// if the current phase is `RoundPhase::Deal`. If not, the method returns
/// `BlackjackError::WrongPhase` naming the method and both phases.
///
/// The expansion refers to `RoundPhase` and `BlackjackError` unqualified, so
/// both must be in scope where the macro is used, and the method must return
/// `Result<_, BlackjackError>`.
#[proc_macro_attribute]
pub fn allowed_phase(attr: TokenStream1, item: TokenStream1) -> TokenStream1 {
    let phase = parse_macro_input!(attr as syn::Ident);
    let mut ast = parse_macro_input!(item as syn::ImplItemFn);
    let operation = ast.sig.ident.to_string();

    let early_return: syn::Stmt = parse_quote! {
        if self.current_phase != RoundPhase::#phase {
            return Err(BlackjackError::WrongPhase {
                operation: #operation,
                expected: RoundPhase::#phase,
                actual: self.current_phase,
            });
        }
    };
    ast.block.stmts.insert(0, early_return);
    ast.into_token_stream().into()
}
