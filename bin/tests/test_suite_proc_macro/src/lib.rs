use quote::{format_ident, quote};

/// Emits one `#[test]` per `.calc` fixture below `bin/tests`. The fixture's
/// directory name selects the stage it is checked against.
#[proc_macro]
pub fn generate_tests(_: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let root_dir = format!("{}/..", env!("CARGO_MANIFEST_DIR"));
    let mut entries = walkdir::WalkDir::new(root_dir.clone())
        .into_iter()
        .flatten()
        .filter(|entry| entry.path().extension() == Some("calc".as_ref()))
        .collect::<Vec<_>>();
    entries.sort_by(|a, b| a.path().cmp(b.path()));

    let tests = entries.iter().map(|entry| {
        let test_file_path = entry.path().to_string_lossy();
        let stage = entry
            .path()
            .parent()
            .and_then(|dir| dir.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let relative_test_path = entry.path().strip_prefix(&root_dir).unwrap().to_string_lossy();
        let test_ident = format_ident!(
            "test_{}",
            relative_test_path.replace(".calc", "").replace(['/', '-'], "_")
        );
        quote! {
            #[test]
            fn #test_ident() {
                fixture_expect(#stage, std::fs::read_to_string(#test_file_path).unwrap().as_str());
            }
        }
    });

    quote! {
        #[ctor::ctor]
        fn init() {
            env_logger::init();
        }

        #(#tests)*
    }
    .into()
}
