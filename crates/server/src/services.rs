mod aggregator;
mod image_proxy;

pub use aggregator::AggregatorService;
pub use image_proxy::{
    CacheStatus, Clock, FetchedImage, ImageFetchError, ImageFetcher, ImageProxyError,
    ImageProxyService, ProxyImage, ReqwestImageFetcher,
};
