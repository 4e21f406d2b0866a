use aws_sdk_s3::primitives::ByteStream;
use chrono::Utc;
use greeting_artifacts_lambda::adapters::object_store::ArtifactStore;
use greeting_artifacts_lambda::config::{ConfigError, HandlerConfig};
use greeting_artifacts_lambda::handlers::greeting::{
    handle_greeting_event_with_default_generators, misconfiguration_response, ApiGatewayResponse,
};
use greeting_artifacts_lambda::logging::{init_logging, COMPONENT};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

struct S3ArtifactStore {
    s3_client: aws_sdk_s3::Client,
}

impl ArtifactStore for S3ArtifactStore {
    fn upload(
        &self,
        bucket: &str,
        key: &str,
        body: &[u8],
        content_type: &str,
    ) -> Result<(), String> {
        let bucket = bucket.to_string();
        let object_key = key.to_string();
        let content_type = content_type.to_string();
        let body_bytes = body.to_vec();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_object()
                    .bucket(bucket)
                    .key(object_key)
                    .content_type(content_type)
                    .body(ByteStream::from(body_bytes))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to write object to s3: {error}"))
            })
        })
    }
}

struct RuntimeDependencies {
    config: Result<HandlerConfig, ConfigError>,
    store: S3ArtifactStore,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<ApiGatewayResponse, Error> {
    let response = match &deps.config {
        Ok(config) => handle_greeting_event_with_default_generators(
            event.payload,
            config,
            Utc::now(),
            &deps.store,
        ),
        Err(error) => misconfiguration_response(error),
    };
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging()?;

    let config = HandlerConfig::from_env();
    if let Err(error) = &config {
        tracing::error!(
            component = COMPONENT,
            event = "startup_misconfiguration",
            error = %error,
            "invocations will be rejected until configuration is fixed"
        );
    }

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = RuntimeDependencies {
        config,
        store: S3ArtifactStore {
            s3_client: aws_sdk_s3::Client::new(&aws_config),
        },
    };

    lambda_runtime::run(service_fn(|event| handle_request(event, &deps))).await
}
