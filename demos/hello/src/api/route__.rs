// Code generated by routemark-gen. DO NOT EDIT.

//! Route registration for the `api` module.
#![allow(clippy::all, clippy::pedantic)]
use routemark::DefaultContext;
use crate::models;
impl super::greeter::Greeter {
    /// Registers every `@RequestMapping` handler of this type on `server`.
    pub fn register_routes(
        self: ::std::sync::Arc<Self>,
        server: &mut ::routemark::Server,
    ) {
        let g = self;
        server
            .route(
                ::routemark::HttpMethod::Get,
                "/bye",
                ::routemark::new_request::<models::HelloRequest>,
                ::routemark::handle_func({
                    let g = ::std::sync::Arc::clone(&g);
                    move |
                        req: ::std::boxed::Box<models::HelloRequest>,
                        ctx: ::std::sync::Arc<DefaultContext>|
                    {
                        let g = ::std::sync::Arc::clone(&g);
                        async move { g.bye(&req, &ctx) }
                    }
                }),
            );
        server
            .route(
                ::routemark::HttpMethod::Get,
                "/hello",
                ::routemark::new_request::<models::HelloRequest>,
                ::routemark::handle_func({
                    let g = ::std::sync::Arc::clone(&g);
                    move |
                        req: ::std::boxed::Box<models::HelloRequest>,
                        ctx: ::std::sync::Arc<DefaultContext>|
                    {
                        let g = ::std::sync::Arc::clone(&g);
                        async move { g.hello(&req, &ctx).await }
                    }
                }),
            );
    }
}
impl super::pets::PetStore {
    /// Registers every `@RequestMapping` handler of this type on `server`.
    pub fn register_routes(
        self: ::std::sync::Arc<Self>,
        server: &mut ::routemark::Server,
    ) {
        let p = self;
        server
            .route(
                ::routemark::HttpMethod::Get,
                "/pets",
                ::routemark::new_request::<models::PetQuery>,
                ::routemark::handle_func({
                    let p = ::std::sync::Arc::clone(&p);
                    move |
                        req: ::std::boxed::Box<models::PetQuery>,
                        ctx: ::std::sync::Arc<DefaultContext>|
                    {
                        let p = ::std::sync::Arc::clone(&p);
                        async move { p.list(&req, &ctx) }
                    }
                }),
            );
        server
            .route(
                ::routemark::HttpMethod::Post,
                "/pets",
                ::routemark::new_request::<models::Pet>,
                ::routemark::handle_func({
                    let p = ::std::sync::Arc::clone(&p);
                    move |
                        req: ::std::boxed::Box<models::Pet>,
                        ctx: ::std::sync::Arc<DefaultContext>|
                    {
                        let p = ::std::sync::Arc::clone(&p);
                        async move { p.create(&req, &ctx).await }
                    }
                }),
            );
    }
}
