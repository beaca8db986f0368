use proc_macro2::TokenStream;
use quote::quote;
use routemark_core::HttpMethod;

/// Convert HttpMethod to the routemark runtime TokenStream
pub fn http_method_to_token_stream(method: HttpMethod) -> TokenStream {
    match method {
        HttpMethod::Get => quote! { ::routemark::HttpMethod::Get },
        HttpMethod::Post => quote! { ::routemark::HttpMethod::Post },
        HttpMethod::Put => quote! { ::routemark::HttpMethod::Put },
        HttpMethod::Patch => quote! { ::routemark::HttpMethod::Patch },
        HttpMethod::Delete => quote! { ::routemark::HttpMethod::Delete },
        HttpMethod::Head => quote! { ::routemark::HttpMethod::Head },
        HttpMethod::Options => quote! { ::routemark::HttpMethod::Options },
        HttpMethod::Trace => quote! { ::routemark::HttpMethod::Trace },
    }
}
