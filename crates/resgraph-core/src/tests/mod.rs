
use crate::{GenericResource, ResourceRef};

pub(crate) const KINESIS: &str = "kinesis";
pub(crate) const LAMBDA: &str = "lambda";
pub(crate) const SQS: &str = "sqs";

pub(crate) fn res(id: &str, value: &str, resource_type: &str) -> ResourceRef {
    GenericResource::shared(id, value, resource_type)
}
