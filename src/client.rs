use reqwest::{Client as ReqwestClient, Method, RequestBuilder};
use secrecy::ExposeSecret as _;
use url::Url;

use crate::Result;
use crate::auth::Credentials;
use crate::config::Config;
use crate::signing;
use crate::types::{
    CreateImageRequest, CreateTemplateRequest, CreatedImage, CreatedTemplate,
    ListTemplatesRequest, SignedUrl, TemplateList, TemplateValues, UrlToImageRequest,
};

/// Client for the HTML/CSS to Image REST API.
///
/// Every HTTP call authenticates with basic auth using the configured credentials. Cloning is
/// cheap: the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct Client {
    host: Url,
    credentials: Credentials,
    client: ReqwestClient,
}

impl Client {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_http_client(config, ReqwestClient::new())
    }

    /// Creates a client on top of a caller-configured HTTP client (timeouts, proxies, ...).
    #[must_use]
    pub fn with_http_client(config: Config, client: ReqwestClient) -> Self {
        Self {
            host: config.host,
            credentials: config.credentials,
            client,
        }
    }

    /// Creates a client for the public host with credentials read from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Config::from_env()?))
    }

    #[must_use]
    pub fn host(&self) -> &Url {
        &self.host
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Renders an HTML snippet or page. The image URL is at [`CreatedImage::url`].
    pub async fn create_image(&self, request: &CreateImageRequest) -> Result<CreatedImage> {
        request.validate()?;

        let request = self
            .authenticated(Method::POST, "v1/image")?
            .query(&[("includeId", "true")])
            .json(request)
            .build()?;

        crate::request(&self.client, request).await
    }

    /// Screenshots a public web page.
    pub async fn url_to_image(&self, request: &UrlToImageRequest) -> Result<CreatedImage> {
        request.validate()?;

        let request = self
            .authenticated(Method::POST, "v1/image")?
            .query(&[("includeId", "true")])
            .json(request)
            .build()?;

        crate::request(&self.client, request).await
    }

    /// Deletes an image.
    ///
    /// A rejected delete surfaces as a [`crate::error::Status`] error carrying the raw
    /// response status and body.
    pub async fn delete_image(&self, image_id: &str) -> Result<()> {
        let path = format!("v1/image/{}", signing::encode_component(image_id));
        let request = self.authenticated(Method::DELETE, &path)?.build()?;

        crate::send(&self.client, request).await?;
        Ok(())
    }

    /// Lists the account's templates.
    pub async fn templates(&self, request: &ListTemplatesRequest) -> Result<TemplateList> {
        let request = self
            .authenticated(Method::GET, "v1/template")?
            .query(request)
            .build()?;

        crate::request(&self.client, request).await
    }

    pub async fn create_template(
        &self,
        request: &CreateTemplateRequest,
    ) -> Result<CreatedTemplate> {
        request.validate()?;

        let request = self
            .authenticated(Method::POST, "v1/template")?
            .json(request)
            .build()?;

        crate::request(&self.client, request).await
    }

    /// Builds a signed image URL for a template without making any request.
    ///
    /// See [`signing::sign_template_url`].
    pub fn create_image_from_template(
        &self,
        template_id: &str,
        values: &TemplateValues,
    ) -> Result<SignedUrl> {
        signing::sign_template_url(self.credentials.api_key(), template_id, values)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.host.join(path)?)
    }

    fn authenticated(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        Ok(self
            .client
            .request(method, self.endpoint(path)?)
            .basic_auth(
                self.credentials.user_id(),
                Some(self.credentials.api_key().expose_secret()),
            ))
    }
}
