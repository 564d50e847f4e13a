mod request;
mod response;
mod template_values;

pub use request::{
    CreateImageRequest, CreateTemplateRequest, ListTemplatesRequest, RenderOptions,
    UrlToImageRequest,
};
pub use response::{CreatedImage, CreatedTemplate, SignedUrl, Template, TemplateList};
pub use template_values::{TemplateValue, TemplateValues};
