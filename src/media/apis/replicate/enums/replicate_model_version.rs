#[non_exhaustive]
pub struct ReplicateModelVersion;

impl ReplicateModelVersion {
    pub const MIRAGE_GHIBLI: &'static str =
        "166efd159b4138da932522bc5af40d39194033f587d9bdbab1e594119eae3e7f";
}

#[non_exhaustive]
pub struct ReplicateModel;

impl ReplicateModel {
    pub const MIRAGE_GHIBLI: &'static str = "aaronaftab/mirage-ghibli";
}
