mod dispatch;
mod util;
