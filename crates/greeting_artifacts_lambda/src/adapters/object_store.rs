pub trait ArtifactStore {
    fn upload(
        &self,
        bucket: &str,
        key: &str,
        body: &[u8],
        content_type: &str,
    ) -> Result<(), String>;
}
