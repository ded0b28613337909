//! Face-shape detection upload

use super::PublicShopClient;
use crate::error::ClientError;
use crate::types::FaceShapeResponse;
use reqwest::multipart::{Form, Part};

impl PublicShopClient {
    /// Upload a face photo and get the detected face shape back.
    ///
    /// The backend expects a multipart form with the image under the
    /// `image` field.
    pub async fn detect_face_shape(
        &self,
        image: Vec<u8>,
        filename: impl Into<String>,
    ) -> Result<FaceShapeResponse, ClientError> {
        let part = Part::bytes(image).file_name(filename.into());
        let form = Form::new().part("image", part);
        let req = self
            .request(reqwest::Method::POST, "/api/detect/")
            .multipart(form);
        self.execute(req).await
    }
}
