use std::env::var;

#[derive(Debug)]
pub struct EnvConfig {
    pub model_path: String,
    pub labels_path: String,
    pub upload_dir: String,
    pub host_address: [u8; 4],
    pub port: u16,
    pub max_upload_bytes: u64,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvConfig {
    pub fn new() -> Self {
        let model_path = var("MODEL_PATH").unwrap_or_else(|_| "models/trashbox_resnet50.onnx".to_owned());
        let labels_path = var("LABELS_PATH").unwrap_or_else(|_| "models/class_names.json".to_owned());
        let upload_dir = var("UPLOAD_DIR").unwrap_or_else(|_| "static/uploads".to_owned());
        let host_address = var("HOST_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let host_address: Vec<u8> = host_address.split('.').map(|o| o.parse().unwrap()).collect();
        let port = var("PORT").unwrap_or_else(|_| "5000".to_owned()).parse().unwrap();
        let max_upload_bytes = var("MAX_UPLOAD_BYTES").unwrap_or_else(|_| "10485760".to_owned()).parse().unwrap();

        let result = Self {
            model_path,
            labels_path,
            upload_dir,
            host_address: host_address.try_into().unwrap(),
            port,
            max_upload_bytes,
        };
        tracing::debug!("{:?}", result);
        result
    }
}
