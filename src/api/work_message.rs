//! WeCom application messaging
//!
//! Message bodies and responses are raw JSON; see the WeCom message push
//! documentation for their shapes.

use std::sync::Arc;

use crate::api::work::WorkAgent;
use crate::client::{Transport, WechatClient, CONTENT_TYPE_JSON};
use crate::error::WechatError;

const API_SEND: &str = "/cgi-bin/message/send";
const API_UPDATE_TASKCARD: &str = "/cgi-bin/message/update_taskcard";
const API_APPCHAT_CREATE: &str = "/cgi-bin/appchat/create";
const API_APPCHAT_UPDATE: &str = "/cgi-bin/appchat/update";
const API_APPCHAT_GET: &str = "/cgi-bin/appchat/get";
const API_APPCHAT_SEND: &str = "/cgi-bin/appchat/send";
const API_LINKEDCORP_MESSAGE_SEND: &str = "/cgi-bin/linkedcorp/message/send";
const API_GET_STATISTICS: &str = "/cgi-bin/message/get_statistics";

/// Message push API of a WeCom application
#[derive(Debug)]
pub struct WorkMessageApi<T = WechatClient> {
    transport: Arc<T>,
}

impl<T> Clone for WorkMessageApi<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: Transport> WorkMessageApi<T> {
    /// Share the agent's transport.
    pub fn new(agent: &WorkAgent<T>) -> Self {
        Self {
            transport: Arc::clone(agent.transport()),
        }
    }

    /// Send an application message (text, image, video, file, news, ...).
    ///
    /// POST /cgi-bin/message/send
    pub async fn send(&self, payload: &[u8]) -> Result<Vec<u8>, WechatError> {
        self.post(API_SEND, payload).await
    }

    /// Update the state of a task card message.
    ///
    /// POST /cgi-bin/message/update_taskcard
    pub async fn update_taskcard(&self, payload: &[u8]) -> Result<Vec<u8>, WechatError> {
        self.post(API_UPDATE_TASKCARD, payload).await
    }

    /// POST /cgi-bin/appchat/create
    pub async fn appchat_create(&self, payload: &[u8]) -> Result<Vec<u8>, WechatError> {
        self.post(API_APPCHAT_CREATE, payload).await
    }

    /// POST /cgi-bin/appchat/update
    pub async fn appchat_update(&self, payload: &[u8]) -> Result<Vec<u8>, WechatError> {
        self.post(API_APPCHAT_UPDATE, payload).await
    }

    /// Fetch a group chat, e.g. `&[("chatid", "CHATID")]`.
    ///
    /// GET /cgi-bin/appchat/get
    pub async fn appchat_get(&self, query: &[(&str, &str)]) -> Result<Vec<u8>, WechatError> {
        self.transport.get(API_APPCHAT_GET, query).await
    }

    /// Push a message into a group chat.
    ///
    /// POST /cgi-bin/appchat/send
    pub async fn appchat_send(&self, payload: &[u8]) -> Result<Vec<u8>, WechatError> {
        self.post(API_APPCHAT_SEND, payload).await
    }

    /// Send a message to members of linked corporations.
    ///
    /// POST /cgi-bin/linkedcorp/message/send
    pub async fn linkedcorp_message_send(&self, payload: &[u8]) -> Result<Vec<u8>, WechatError> {
        self.post(API_LINKEDCORP_MESSAGE_SEND, payload).await
    }

    /// POST /cgi-bin/message/get_statistics
    pub async fn get_statistics(&self, payload: &[u8]) -> Result<Vec<u8>, WechatError> {
        self.post(API_GET_STATISTICS, payload).await
    }

    async fn post(&self, path: &str, payload: &[u8]) -> Result<Vec<u8>, WechatError> {
        self.transport.post(path, payload, CONTENT_TYPE_JSON).await
    }
}
