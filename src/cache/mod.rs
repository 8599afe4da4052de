//! Tầng bộ nhớ đệm đối tượng
//!
//! Backend cắm được (moka trong tiến trình hoặc redis), đăng ký qua registry
//! lúc khởi động. Dùng để đệm các bản chụp rubric trên đường kiểm tra điểm.

pub mod object_cache;
pub mod register;
mod traits;

pub use traits::{CacheResult, ObjectCache};

/// Khai báo một backend cache và tự đăng ký vào registry lúc nạp chương trình
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ident) => {
        ::paste::paste! {
            #[allow(non_snake_case)]
            #[::ctor::ctor]
            fn [<__register_cache_plugin_ $ty>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    ::std::sync::Arc::new(|| {
                        let fut: $crate::cache::register::BoxedObjectCacheFuture =
                            ::std::boxed::Box::pin(async {
                                let cache = <$ty>::new()
                                    .map_err($crate::errors::DrlError::cache_connection)?;
                                Ok(::std::boxed::Box::new(cache)
                                    as ::std::boxed::Box<dyn $crate::cache::ObjectCache>)
                            });
                        fut
                    }),
                );
            }
        }
    };
}
