use nalgebra as na;

use dobot_msgs::msg::geometry_msgs::Quaternion;

/// Euler angles (roll, pitch, yaw) in radians for a ROS quaternion.
pub fn quat_to_euler(quat: &Quaternion) -> (f64, f64, f64) {
    let u_q = na::UnitQuaternion::from_quaternion(na::Quaternion::new(
        quat.w, quat.x, quat.y, quat.z,
    ));
    u_q.euler_angles()
}
