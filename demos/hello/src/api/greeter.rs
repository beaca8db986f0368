use routemark::DefaultContext;

use crate::models;

pub struct Greeter;

impl Greeter {
    /// Greets the caller by name.
    ///
    /// @RequestMapping{"method":"GET","path":"/hello"}
    pub async fn hello(
        &self,
        req: &models::HelloRequest,
        ctx: &DefaultContext,
    ) -> Result<models::HelloResponse, routemark::Error> {
        tracing::debug!(trace_id = %ctx.trace_id, "hello");
        Ok(models::HelloResponse {
            msg: Self::greeting(&req.name),
        })
    }

    /// @RequestMapping{"method":"GET","path":"/bye"}
    pub fn bye(
        &self,
        req: &models::HelloRequest,
        _ctx: &DefaultContext,
    ) -> Result<models::HelloResponse, routemark::Error> {
        Ok(models::HelloResponse {
            msg: format!("bye {}", req.name),
        })
    }

    /// Not a handler: takes no context.
    ///
    /// @RequestMapping{"method":"GET","path":"/shout"}
    pub fn shout(&self, req: &models::HelloRequest) -> String {
        Self::greeting(&req.name).to_uppercase()
    }

    fn greeting(name: &str) -> String {
        if name.is_empty() {
            "hello".to_string()
        } else {
            format!("hello {name}")
        }
    }
}
