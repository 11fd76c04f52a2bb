//! Built-in codecs

use std::sync::Arc;

use crate::codec::{BuiltinCodec, Codec};

mod attachment;
mod control;
mod reaction;
mod reply;
mod text;

pub use self::attachment::{AttachmentCodec, MultiRemoteAttachmentCodec, RemoteAttachmentCodec};
pub use self::control::{
    DeleteMessageCodec, GroupChangeCodec, GroupUpdatedCodec, LeaveRequestCodec, ReadReceiptCodec,
};
pub use self::reaction::{ReactionCodec, ReactionV2Codec};
pub use self::reply::ReplyCodec;
pub use self::text::TextCodec;

/// One codec per built-in tag, in probe order
pub(crate) fn builtin_codecs(max_reply_depth: usize) -> Vec<Arc<dyn Codec>> {
    vec![
        Arc::new(BuiltinCodec(TextCodec)),
        Arc::new(BuiltinCodec(AttachmentCodec)),
        Arc::new(BuiltinCodec(RemoteAttachmentCodec)),
        Arc::new(BuiltinCodec(MultiRemoteAttachmentCodec)),
        Arc::new(BuiltinCodec(ReactionCodec)),
        Arc::new(BuiltinCodec(ReactionV2Codec)),
        Arc::new(BuiltinCodec(ReplyCodec::new(max_reply_depth))),
        Arc::new(BuiltinCodec(ReadReceiptCodec)),
        Arc::new(BuiltinCodec(DeleteMessageCodec)),
        Arc::new(BuiltinCodec(LeaveRequestCodec)),
        Arc::new(BuiltinCodec(GroupChangeCodec)),
        Arc::new(BuiltinCodec(GroupUpdatedCodec)),
    ]
}
